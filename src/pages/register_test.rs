use super::*;

fn valid() -> RegisterForm {
    RegisterForm {
        national_id: "1234567890".to_owned(),
        first_name: "Jane".to_owned(),
        last_name: "Wanjiru".to_owned(),
        email: "jane@example.test".to_owned(),
        phone_number: "254712345678".to_owned(),
        password: "s3cret-pass".to_owned(),
        confirm_password: "s3cret-pass".to_owned(),
        agree_to_terms: true,
    }
}

#[test]
fn valid_form_has_no_problems() {
    assert!(validate_registration(&valid()).is_empty());
}

#[test]
fn reports_each_broken_rule() {
    let form = RegisterForm {
        national_id: "123".to_owned(),
        first_name: "J".to_owned(),
        email: "jane.example.test".to_owned(),
        phone_number: "0712345678".to_owned(),
        confirm_password: "different".to_owned(),
        agree_to_terms: false,
        ..valid()
    };
    assert_eq!(
        validate_registration(&form),
        vec![
            "National ID must be at least 10 characters.",
            "First name must be 2 to 50 characters.",
            "Enter a valid email address.",
            "Phone number must look like 254712345678.",
            "Passwords do not match.",
            "You must accept the terms.",
        ]
    );
}

#[test]
fn request_is_trimmed() {
    let form = RegisterForm { first_name: "  Jane ".to_owned(), email: " jane@example.test ".to_owned(), ..valid() };
    let req = form.to_request();
    assert_eq!(req.first_name, "Jane");
    assert_eq!(req.email, "jane@example.test");
    assert_eq!(req.national_id.as_deref(), Some("1234567890"));
}
