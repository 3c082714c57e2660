#[derive(Debug, Clone)]
pub struct PostalCode(String);

impl PostalCode {
    pub const LENGTH: usize = 8;

    pub fn parse(s: String) -> Result<PostalCode, String> {
        let length = s.chars().count();
        if length == 0 {
            Err("postal code is required.".to_string())
        } else if length != Self::LENGTH {
            Err(format!(
                "{:?} is not a valid postal code, it must be exactly {} characters long.",
                s,
                Self::LENGTH
            ))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
