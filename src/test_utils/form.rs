use axum::{body::Body, extract::FromRequest, http::Request};
use axum_extra::extract::Form;
use scraper::{ElementRef, Html, Selector};
use serde::de::DeserializeOwned;

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        got, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {got:?}"
    );
}

/// Asserts that `form` has a required input called `name` of type `type_`.
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let selector = Selector::parse(&format!("input[name={name}]")).unwrap();
    let input = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""));

    let input_type = input.value().attr("type").unwrap_or_default();
    assert_eq!(
        input_type, type_,
        "want input with type \"{type_}\", got {input_type:?}"
    );
    assert!(
        input.value().attr("required").is_some(),
        "want input with name {name} to have the required attribute but got none"
    );
}

#[track_caller]
pub(crate) fn assert_form_submit_button(form: &ElementRef<'_>) {
    let submit_button = form
        .select(&Selector::parse("button").unwrap())
        .next()
        .expect("No button found");

    assert_eq!(
        submit_button.value().attr("type").unwrap_or_default(),
        "submit",
        "want submit button with type=\"submit\""
    );
}

/// Asserts that `form` has the income/expense radio pair with exactly one
/// checked, and that `checked_type` is the checked one when given.
#[track_caller]
pub(crate) fn assert_transaction_type_inputs(form: &ElementRef<'_>, checked_type: Option<&str>) {
    let selector = Selector::parse("input[type=radio][name=type_]").unwrap();
    let inputs = form.select(&selector).collect::<Vec<_>>();
    assert_eq!(
        inputs.len(),
        2,
        "want 2 transaction type inputs, got {}",
        inputs.len()
    );

    let mut values = inputs
        .iter()
        .filter_map(|input| input.value().attr("value"))
        .collect::<Vec<_>>();
    values.sort_unstable();
    assert_eq!(values, vec!["expense", "income"]);

    let checked = inputs
        .iter()
        .filter(|input| input.value().attr("checked").is_some())
        .collect::<Vec<_>>();
    assert_eq!(
        checked.len(),
        1,
        "want exactly one transaction type input checked, got {}",
        checked.len()
    );

    if let Some(checked_type) = checked_type {
        assert_eq!(
            checked[0].value().attr("value"),
            Some(checked_type),
            "want {checked_type} to be checked"
        );
    }
}

/// Parses a url-encoded form body with the same extractor the endpoints use.
pub(crate) async fn extract_form<T: DeserializeOwned>(body: &str) -> T {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap();

    let Form(form) = Form::<T>::from_request(request, &()).await.unwrap();
    form
}
