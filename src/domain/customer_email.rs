use validator::validate_email;

#[derive(Debug, Clone)]
pub struct CustomerEmail(String);

impl CustomerEmail {
    pub fn parse(s: String) -> Result<CustomerEmail, String> {
        if validate_email(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{:?} is not a valid customer email.", s))
        }
    }
}

impl AsRef<str> for CustomerEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
