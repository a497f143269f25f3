/// The two input modes, classified once at the request boundary. A URL
/// is scraped; anything else is treated as a free-text claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Url(String),
    Claim(String),
}

pub fn classify(input: &str) -> InputKind {
    if input.starts_with("http://") || input.starts_with("https://") {
        InputKind::Url(input.to_string())
    } else {
        InputKind::Claim(input.to_string())
    }
}
