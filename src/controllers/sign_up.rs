use super::{recover, Controller};
use crate::error::ApiError;
use crate::http::{bad_request, created, Request, Response};
use crate::model::AddAccountModel;
use crate::usecases::{AddAccount, Encrypter, Validator};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

/// Checked in this order; the first missing one is reported.
const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "password"];

pub struct SignUpController {
    add_account: Arc<dyn AddAccount>,
    email_validator: Arc<dyn Validator>,
    encrypter: Arc<dyn Encrypter>,
}

impl SignUpController {
    pub fn new(
        add_account: Arc<dyn AddAccount>,
        email_validator: Arc<dyn Validator>,
        encrypter: Arc<dyn Encrypter>,
    ) -> Self {
        SignUpController {
            add_account,
            email_validator,
            encrypter,
        }
    }

    async fn sign_up(&self, request: &Request) -> anyhow::Result<Response> {
        if let Some(field) = REQUIRED_FIELDS
            .iter()
            .find(|field| !request.has_field(field))
        {
            debug!("sign-up rejected, missing {}", field);
            return Ok(bad_request(ApiError::missing_param(field)));
        }

        let (name, email, password) = match text_fields(request) {
            Ok(fields) => fields,
            Err(field) => return Ok(bad_request(ApiError::invalid_param(field))),
        };

        if !self.email_validator.is_valid(email)? {
            debug!("sign-up rejected, invalid email {:?}", email);
            return Ok(bad_request(ApiError::invalid_param("email")));
        }

        let hashed_password = self.encrypter.encrypt(password).await?;
        let account = self
            .add_account
            .execute(AddAccountModel {
                name: name.to_owned(),
                email: email.to_owned(),
                password: hashed_password,
            })
            .await?;
        Ok(created(&account))
    }
}

/// The required fields as strings, or the first one holding another JSON type.
fn text_fields(request: &Request) -> Result<(&str, &str, &str), &'static str> {
    let text = move |field: &'static str| request.text(field).ok_or(field);
    Ok((text("name")?, text("email")?, text("password")?))
}

#[async_trait]
impl Controller for SignUpController {
    async fn handle(&self, request: Request) -> Response {
        recover(self.sign_up(&request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use crate::usecases::fakes::{FakeAddAccount, FakeEncrypter, FakeValidator};
    use rstest::rstest;
    use serde_json::{json, Value};

    struct Sut {
        add_account: Arc<FakeAddAccount>,
        email_validator: Arc<FakeValidator>,
        encrypter: Arc<FakeEncrypter>,
        controller: SignUpController,
    }

    fn make_sut(
        add_account: FakeAddAccount,
        email_validator: FakeValidator,
        encrypter: FakeEncrypter,
    ) -> Sut {
        let add_account = Arc::new(add_account);
        let email_validator = Arc::new(email_validator);
        let encrypter = Arc::new(encrypter);
        let controller = SignUpController::new(
            add_account.clone(),
            email_validator.clone(),
            encrypter.clone(),
        );
        Sut {
            add_account,
            email_validator,
            encrypter,
            controller,
        }
    }

    fn default_sut() -> Sut {
        make_sut(
            FakeAddAccount::default(),
            FakeValidator::answering(Some(true)),
            FakeEncrypter::default(),
        )
    }

    fn valid_body() -> Value {
        json!({
            "name": "any-name",
            "email": "any-email",
            "password": "any-password",
        })
    }

    fn stack_free(response: &Response) -> (u16, Value) {
        (response.status_code, response.body["error"].clone())
    }

    #[rstest]
    #[case(json!({"email": "any-email", "password": "any-password"}), "name")]
    #[case(json!({"name": "any-name", "password": "any-password"}), "email")]
    #[case(json!({"name": "any-name", "email": "any-email"}), "password")]
    #[case(json!({"name": "", "email": "any-email", "password": "any-password"}), "name")]
    #[case(json!({"password": "any-password"}), "name")]
    #[case(json!({"name": "any-name"}), "email")]
    #[case(json!({}), "name")]
    #[actix_rt::test]
    async fn reports_first_missing_field(#[case] body: Value, #[case] field: &str) {
        let sut = default_sut();
        let response = sut.controller.handle(Request::from_json(body)).await;
        assert_eq!(response, bad_request(ApiError::missing_param(field)));
        assert!(sut.email_validator.calls.lock().unwrap().is_empty());
        assert!(sut.encrypter.calls.lock().unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn non_string_field_is_invalid() {
        let sut = default_sut();
        let body = json!({"name": "any-name", "email": 42, "password": "any-password"});
        let response = sut.controller.handle(Request::from_json(body)).await;
        assert_eq!(response, bad_request(ApiError::invalid_param("email")));
    }

    #[actix_rt::test]
    async fn calls_email_validator_with_email() {
        let sut = default_sut();
        sut.controller.handle(Request::from_json(valid_body())).await;
        assert_eq!(*sut.email_validator.calls.lock().unwrap(), vec!["any-email"]);
    }

    #[actix_rt::test]
    async fn invalid_email_stops_before_hashing() {
        let sut = make_sut(
            FakeAddAccount::default(),
            FakeValidator::answering(Some(false)),
            FakeEncrypter::default(),
        );
        let response = sut.controller.handle(Request::from_json(valid_body())).await;
        assert_eq!(response, bad_request(ApiError::invalid_param("email")));
        assert!(sut.encrypter.calls.lock().unwrap().is_empty());
        assert!(sut.add_account.calls.lock().unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn failing_email_validator_is_server_error() {
        let sut = make_sut(
            FakeAddAccount::default(),
            FakeValidator::answering(None),
            FakeEncrypter::default(),
        );
        let response = sut.controller.handle(Request::from_json(valid_body())).await;
        assert_eq!(stack_free(&response), (500, json!("server_error")));
        assert!(sut.encrypter.calls.lock().unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn hashes_the_raw_password_once() {
        let sut = default_sut();
        sut.controller.handle(Request::from_json(valid_body())).await;
        assert_eq!(*sut.encrypter.calls.lock().unwrap(), vec!["any-password"]);
    }

    #[actix_rt::test]
    async fn failing_encrypter_is_server_error() {
        let sut = make_sut(
            FakeAddAccount::default(),
            FakeValidator::answering(Some(true)),
            FakeEncrypter {
                fail: true,
                ..FakeEncrypter::default()
            },
        );
        let response = sut.controller.handle(Request::from_json(valid_body())).await;
        assert_eq!(stack_free(&response), (500, json!("server_error")));
        assert!(response.body["stack"]
            .as_str()
            .unwrap()
            .contains("encrypter failed"));
        assert!(sut.add_account.calls.lock().unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn passes_hashed_password_to_add_account() {
        let sut = default_sut();
        sut.controller.handle(Request::from_json(valid_body())).await;
        assert_eq!(
            *sut.add_account.calls.lock().unwrap(),
            vec![AddAccountModel {
                name: "any-name".to_owned(),
                email: "any-email".to_owned(),
                password: "hashed-password".to_owned(),
            }]
        );
    }

    #[actix_rt::test]
    async fn failing_add_account_is_server_error() {
        let sut = make_sut(
            FakeAddAccount {
                fail: true,
                ..FakeAddAccount::default()
            },
            FakeValidator::answering(Some(true)),
            FakeEncrypter::default(),
        );
        let response = sut.controller.handle(Request::from_json(valid_body())).await;
        assert_eq!(stack_free(&response), (500, json!("server_error")));
    }

    #[actix_rt::test]
    async fn returns_created_account() {
        let sut = default_sut();
        let response = sut.controller.handle(Request::from_json(valid_body())).await;
        assert_eq!(response.status_code, 201);
        assert_eq!(response.body, serde_json::to_value(fixtures::account()).unwrap());
    }
}
