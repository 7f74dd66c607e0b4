// src/models/certificate.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An issued certificate of completion. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub exam_id: String,

    /// Exam score in percent.
    pub score: u32,

    /// Human-readable unique number printed on the certificate.
    pub certificate_number: String,

    pub issued_at: DateTime<Utc>,
}

/// A certificate before the store has assigned it an id.
#[derive(Debug, Clone)]
pub struct NewCertificate {
    pub user_id: String,
    pub course_id: String,
    pub exam_id: String,
    pub score: u32,
    pub certificate_number: String,
    pub issued_at: DateTime<Utc>,
}

impl NewCertificate {
    pub fn into_certificate(self, id: String) -> Certificate {
        Certificate {
            id,
            user_id: self.user_id,
            course_id: self.course_id,
            exam_id: self.exam_id,
            score: self.score,
            certificate_number: self.certificate_number,
            issued_at: self.issued_at,
        }
    }
}

/// DTO for requesting a certificate directly.
/// The number and issuance time are always generated server-side.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCertificateRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    #[validate(length(min = 1, max = 100))]
    pub course_id: String,
    #[validate(length(min = 1, max = 100))]
    pub exam_id: String,
    #[validate(range(max = 100))]
    pub score: u32,
}
