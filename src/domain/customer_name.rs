#[derive(Debug, Clone)]
pub struct CustomerName(String);

impl CustomerName {
    /// Accepts any name that has at least one non-whitespace character.
    /// The value is kept as entered, surrounding whitespace included.
    pub fn parse(s: String) -> Result<CustomerName, String> {
        if s.trim().is_empty() {
            Err(format!("{:?} is not a valid customer name.", s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for CustomerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
