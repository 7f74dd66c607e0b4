use ammonia;

/// Clean tutorial HTML using the ammonia library.
///
/// Whitelist-based: keeps formatting tags (<h2>, <p>, <code>, <ul>) and drops
/// <script>, <iframe> and event-handler attributes. Code samples belong in
/// `codeExample`, which is stored as plain text and never sanitized.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
