use crate::usecases::Validator;
use email_address::EmailAddress;

pub struct EmailValidatorAdapter;

impl Validator for EmailValidatorAdapter {
    fn is_valid(&self, value: &str) -> anyhow::Result<bool> {
        Ok(EmailAddress::is_valid(value))
    }
}
