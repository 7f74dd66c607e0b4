// src/certification.rs

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    config::CERTIFICATE_PREFIX,
    error::AppError,
    models::certificate::{Certificate, NewCertificate},
    store::Storage,
};

/// Shared by every issuer in the process so numbers never repeat across instances.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Mints certificates for passed exams and persists them in the store.
///
/// The issuer does not check that the exam was passed; callers decide that
/// from a completed attempt before calling [`CertificateIssuer::issue`].
pub struct CertificateIssuer {
    store: Arc<dyn Storage>,
}

impl CertificateIssuer {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Creates a new certificate row. Every call creates a row, even for a
    /// user/exam pair that already holds one.
    pub async fn issue(
        &self,
        user_id: &str,
        course_id: &str,
        exam_id: &str,
        score: u32,
    ) -> Result<Certificate, AppError> {
        let issued_at = Utc::now();
        let certificate = self
            .store
            .create_certificate(NewCertificate {
                user_id: user_id.to_string(),
                course_id: course_id.to_string(),
                exam_id: exam_id.to_string(),
                score,
                certificate_number: self.next_number(issued_at),
                issued_at,
            })
            .await?;

        tracing::info!(
            user_id = %certificate.user_id,
            exam_id = %certificate.exam_id,
            certificate_number = %certificate.certificate_number,
            score = certificate.score,
            "Certificate issued"
        );
        Ok(certificate)
    }

    /// `CERT-<millis base36>-<sequence base36><random>`, upper case.
    ///
    /// The process-wide sequence makes numbers unique even within one millisecond;
    /// the random tail keeps them from being guessable.
    pub fn next_number(&self, now: DateTime<Utc>) -> String {
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        let random = Uuid::new_v4().simple().to_string();
        format!(
            "{}{}-{}{}",
            CERTIFICATE_PREFIX,
            to_base36(millis),
            to_base36(seq),
            &random[..6]
        )
        .to_uppercase()
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
