use std::fmt;
use std::future::Future;
use std::rc::Rc;

use yew::prelude::*;
use log::{info, warn};
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, RequestCredentials};

use crate::config;

pub const INVALID_MESSAGE: &str = "Please fill in your name, email and message.";
pub const SENDING_MESSAGE: &str = "Sending…";
pub const SENT_MESSAGE: &str = "Thanks! We'll be in touch shortly.";
pub const GENERIC_FAILURE: &str = "Something went wrong sending your message. Please try again or email us directly.";

pub const SERVICES: [(&str, &str); 4] = [
    ("", "Choose a service"),
    ("custom-itinerary", "Custom itinerary"),
    ("group-travel", "Group travel"),
    ("honeymoon", "Honeymoon planning"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    Service,
    Message,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

/// Required fields that were blank.
#[derive(Debug, PartialEq)]
pub struct MissingFields(pub Vec<Field>);

impl ContactFields {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Service => self.service = value,
            Field::Message => self.message = value,
        }
    }

    /// Presence check on the required fields; returns the trimmed request.
    pub fn validate(&self) -> Result<ContactRequest, MissingFields> {
        let missing: Vec<Field> = [
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::Message, &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(MissingFields(missing));
        }

        Ok(ContactRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            service: self.service.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

pub enum FieldsAction {
    Edit(Field, String),
    Reset,
}

impl Reducible for ContactFields {
    type Action = FieldsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            FieldsAction::Edit(field, value) => {
                let mut next = (*self).clone();
                next.set(field, value);
                Rc::new(next)
            }
            FieldsAction::Reset => Rc::new(ContactFields::default()),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ContactError {
    /// The server answered with a non-success status.
    Rejected { status: u16, message: Option<String> },
    /// The request never completed.
    Network(String),
}

impl ContactError {
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .filter(|m| !m.trim().is_empty());
        ContactError::Rejected { status, message }
    }

    pub fn user_message(&self) -> String {
        match self {
            ContactError::Rejected { message: Some(message), .. } => message.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactError::Rejected { status, message } => write!(
                f,
                "contact endpoint returned {}: {}",
                status,
                message.as_deref().unwrap_or("<no error field>")
            ),
            ContactError::Network(e) => write!(f, "contact request failed: {}", e),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ContactStatus {
    Idle,
    Invalid,
    Sending,
    Sent,
    Failed(String),
}

impl ContactStatus {
    pub fn from_outcome(outcome: &Result<(), ContactError>) -> Self {
        match outcome {
            Ok(()) => ContactStatus::Sent,
            Err(e) => ContactStatus::Failed(e.user_message()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ContactStatus::Idle => "",
            ContactStatus::Invalid => INVALID_MESSAGE,
            ContactStatus::Sending => SENDING_MESSAGE,
            ContactStatus::Sent => SENT_MESSAGE,
            ContactStatus::Failed(message) => message,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            ContactStatus::Invalid | ContactStatus::Failed(_) => "form-status error",
            ContactStatus::Sent => "form-status success",
            _ => "form-status",
        }
    }

    /// Only a confirmed submission clears what the visitor typed.
    pub fn clears_form(&self) -> bool {
        matches!(self, ContactStatus::Sent)
    }
}

/// Status line plus whether the form controls are locked.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub status: ContactStatus,
    pub disabled: bool,
}

impl Default for Submission {
    fn default() -> Self {
        Self { status: ContactStatus::Idle, disabled: false }
    }
}

pub enum SubmissionAction {
    /// Required fields missing; nothing is sent and the controls stay as they are.
    Invalid,
    Sending,
    Settled(Result<(), ContactError>),
    Reenable,
}

impl Reducible for Submission {
    type Action = SubmissionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            SubmissionAction::Invalid => Submission { status: ContactStatus::Invalid, ..(*self).clone() },
            SubmissionAction::Sending => Submission { status: ContactStatus::Sending, disabled: true },
            // Controls stay locked until the re-enable delay has passed.
            SubmissionAction::Settled(outcome) => Submission {
                status: ContactStatus::from_outcome(&outcome),
                ..(*self).clone()
            },
            SubmissionAction::Reenable => Submission { disabled: false, ..(*self).clone() },
        };
        Rc::new(next)
    }
}

/// Runs one submit attempt: validate, lock, send, report, then unlock after
/// `wait` resolves whatever the outcome. Returns whether a request was sent.
pub async fn submit<S, SFut, W, WFut>(
    fields: &ContactFields,
    send: S,
    wait: W,
    update: impl Fn(SubmissionAction),
    edit: impl Fn(FieldsAction),
) -> bool
where
    S: FnOnce(ContactRequest) -> SFut,
    SFut: Future<Output = Result<(), ContactError>>,
    W: FnOnce() -> WFut,
    WFut: Future<Output = ()>,
{
    let request = match fields.validate() {
        Ok(request) => request,
        Err(MissingFields(missing)) => {
            info!("Contact form incomplete: {:?}", missing);
            update(SubmissionAction::Invalid);
            return false;
        }
    };

    update(SubmissionAction::Sending);
    let outcome = send(request).await;
    match &outcome {
        Ok(()) => edit(FieldsAction::Reset),
        Err(e) => warn!("{}", e),
    }
    update(SubmissionAction::Settled(outcome));

    wait().await;
    update(SubmissionAction::Reenable);
    true
}

async fn post_contact(request: &ContactRequest) -> Result<(), ContactError> {
    let response = Request::post(&config::contact_endpoint())
        .credentials(RequestCredentials::SameOrigin)
        .json(request)
        .map_err(|e| ContactError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ContactError::Network(e.to_string()))?;

    if response.ok() {
        return Ok(());
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ContactError::from_response(status, &body))
}

async fn send_contact(request: ContactRequest) -> Result<(), ContactError> {
    let outcome = post_contact(&request).await;
    if let Err(e) = &outcome {
        gloo_console::error!("Contact submission failed:", e.to_string());
    }
    outcome
}

#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let fields = use_reducer(ContactFields::default);
    let submission = use_reducer(Submission::default);

    let edit = |field: Field| {
        let dispatcher = fields.dispatcher();
        move |value: String| dispatcher.dispatch(FieldsAction::Edit(field, value))
    };

    let onsubmit = {
        let fields = fields.clone();
        let fields_dispatcher = fields.dispatcher();
        let submission = submission.dispatcher();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let snapshot = (*fields).clone();
            let fields_dispatcher = fields_dispatcher.clone();
            let submission = submission.clone();
            wasm_bindgen_futures::spawn_local(async move {
                submit(
                    &snapshot,
                    send_contact,
                    || gloo_timers::future::TimeoutFuture::new(config::REENABLE_DELAY_MS),
                    move |action| submission.dispatch(action),
                    move |action| fields_dispatcher.dispatch(action),
                )
                .await;
            });
        })
    };

    let status = &submission.status;

    html! {
        <form id="contact-form" class="contact-form" novalidate={true} onsubmit={onsubmit}>
            <fieldset disabled={submission.disabled}>
                <label for="contact-name">{"Name"}</label>
                <input
                    id="contact-name"
                    name="name"
                    type="text"
                    autocomplete="name"
                    value={fields.name.clone()}
                    oninput={let edit = edit(Field::Name); move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        edit(input.value());
                    }}
                />

                <label for="contact-email">{"Email"}</label>
                <input
                    id="contact-email"
                    name="email"
                    type="email"
                    autocomplete="email"
                    value={fields.email.clone()}
                    oninput={let edit = edit(Field::Email); move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        edit(input.value());
                    }}
                />

                <label for="contact-phone">{"Phone (optional)"}</label>
                <input
                    id="contact-phone"
                    name="phone"
                    type="tel"
                    autocomplete="tel"
                    value={fields.phone.clone()}
                    oninput={let edit = edit(Field::Phone); move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        edit(input.value());
                    }}
                />

                <label for="contact-service">{"Service"}</label>
                <select
                    id="contact-service"
                    name="service"
                    onchange={let edit = edit(Field::Service); move |e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        edit(select.value());
                    }}
                >
                    {
                        SERVICES.iter().map(|(value, label)| html! {
                            <option value={*value} selected={fields.service == *value}>{*label}</option>
                        }).collect::<Html>()
                    }
                </select>

                <label for="contact-message">{"Message"}</label>
                <textarea
                    id="contact-message"
                    name="message"
                    rows="5"
                    value={fields.message.clone()}
                    oninput={let edit = edit(Field::Message); move |e: InputEvent| {
                        let area: HtmlTextAreaElement = e.target_unchecked_into();
                        edit(area.value());
                    }}
                />

                <button type="submit" class="form-submit">{"Send message"}</button>
            </fieldset>
            <p id="form-status" class={status.class()} role="status" aria-live="polite">
                {status.text().to_string()}
            </p>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ContactFields {
        ContactFields {
            name: "  Ada Lovelace ".into(),
            email: "ada@example.com".into(),
            phone: "".into(),
            service: "honeymoon".into(),
            message: "Two weeks in the Azores, please.\n".into(),
        }
    }

    #[test]
    fn complete_form_validates_and_trims() {
        let request = complete().validate().expect("valid form");
        assert_eq!(request.name, "Ada Lovelace");
        assert_eq!(request.message, "Two weeks in the Azores, please.");
        assert_eq!(request.phone, "");
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        for field in [Field::Name, Field::Email, Field::Message] {
            let mut fields = complete();
            fields.set(field, "   \t".into());
            assert_eq!(fields.validate(), Err(MissingFields(vec![field])));
        }
    }

    #[test]
    fn optional_fields_may_be_blank() {
        let mut fields = complete();
        fields.set(Field::Phone, String::new());
        fields.set(Field::Service, String::new());
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        assert_eq!(
            ContactFields::default().validate(),
            Err(MissingFields(vec![Field::Name, Field::Email, Field::Message]))
        );
    }

    #[test]
    fn request_serializes_all_five_fields() {
        let json = serde_json::to_value(complete().validate().unwrap()).unwrap();
        let object = json.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, ["email", "message", "name", "phone", "service"]);
        assert_eq!(json["service"], "honeymoon");
    }

    #[test]
    fn server_error_message_is_surfaced() {
        let err = ContactError::from_response(422, r#"{"error":"Email looks invalid"}"#);
        assert_eq!(
            err,
            ContactError::Rejected { status: 422, message: Some("Email looks invalid".into()) }
        );
        assert_eq!(err.user_message(), "Email looks invalid");
    }

    #[test]
    fn unusable_error_bodies_fall_back_to_generic() {
        for body in ["", "<html>502</html>", "{}", r#"{"error":""}"#, r#"{"error":null}"#] {
            let err = ContactError::from_response(500, body);
            assert_eq!(err.user_message(), GENERIC_FAILURE, "body: {body}");
        }
        assert_eq!(ContactError::Network("offline".into()).user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn success_clears_and_failure_preserves() {
        let sent = ContactStatus::from_outcome(&Ok(()));
        assert_eq!(sent, ContactStatus::Sent);
        assert!(sent.clears_form());

        let failed = ContactStatus::from_outcome(&Err(ContactError::Network("timeout".into())));
        assert!(!failed.clears_form());
        assert_eq!(failed.text(), GENERIC_FAILURE);
    }

    #[test]
    fn reducer_edits_and_resets() {
        let fields = Rc::new(ContactFields::default());
        let fields = fields.reduce(FieldsAction::Edit(Field::Email, "a@b.c".into()));
        assert_eq!(fields.email, "a@b.c");
        let fields = fields.reduce(FieldsAction::Reset);
        assert_eq!(*fields, ContactFields::default());
    }

    #[test]
    fn status_texts() {
        assert_eq!(ContactStatus::Idle.text(), "");
        assert_eq!(ContactStatus::Invalid.text(), INVALID_MESSAGE);
        assert_eq!(ContactStatus::Sending.text(), "Sending…");
        assert_eq!(ContactStatus::Invalid.class(), "form-status error");
    }

    use std::cell::{Cell, RefCell};

    use futures::executor::block_on;
    use futures::future::ready;

    /// Form and submission state driven through `submit`, recording what
    /// the controls looked like while the request and the delay were pending.
    struct FormHarness {
        fields: RefCell<Rc<ContactFields>>,
        submission: RefCell<Rc<Submission>>,
        requests: Cell<usize>,
        while_sending: RefCell<Option<Submission>>,
        while_waiting: RefCell<Option<Submission>>,
    }

    impl FormHarness {
        fn new(fields: ContactFields) -> Self {
            Self {
                fields: RefCell::new(Rc::new(fields)),
                submission: RefCell::new(Rc::new(Submission::default())),
                requests: Cell::new(0),
                while_sending: RefCell::new(None),
                while_waiting: RefCell::new(None),
            }
        }

        fn submission(&self) -> Submission {
            (**self.submission.borrow()).clone()
        }

        fn fields(&self) -> ContactFields {
            (**self.fields.borrow()).clone()
        }

        fn run(&self, outcome: Result<(), ContactError>) -> bool {
            let fields = self.fields();
            block_on(submit(
                &fields,
                |_request| {
                    self.requests.set(self.requests.get() + 1);
                    *self.while_sending.borrow_mut() = Some(self.submission());
                    ready(outcome)
                },
                || {
                    *self.while_waiting.borrow_mut() = Some(self.submission());
                    ready(())
                },
                |action| {
                    let current = self.submission.borrow().clone();
                    *self.submission.borrow_mut() = current.reduce(action);
                },
                |action| {
                    let current = self.fields.borrow().clone();
                    *self.fields.borrow_mut() = current.reduce(action);
                },
            ))
        }
    }

    #[test]
    fn blank_required_field_sends_nothing_and_leaves_controls_enabled() {
        for field in [Field::Name, Field::Email, Field::Message] {
            let mut fields = complete();
            fields.set(field, " ".into());
            let form = FormHarness::new(fields.clone());

            assert!(!form.run(Ok(())));
            assert_eq!(form.requests.get(), 0);
            assert!(!form.submission().disabled);
            assert_eq!(form.submission().status, ContactStatus::Invalid);
            assert!(form.while_waiting.borrow().is_none());
            assert_eq!(form.fields(), fields);
        }
    }

    #[test]
    fn complete_form_locks_until_the_delay_then_clears_on_success() {
        let form = FormHarness::new(complete());
        assert!(form.run(Ok(())));
        assert_eq!(form.requests.get(), 1);

        let sending = form.while_sending.borrow().clone().unwrap();
        assert!(sending.disabled);
        assert_eq!(sending.status, ContactStatus::Sending);

        let waiting = form.while_waiting.borrow().clone().unwrap();
        assert!(waiting.disabled);
        assert_eq!(waiting.status, ContactStatus::Sent);

        assert!(!form.submission().disabled);
        assert_eq!(form.submission().status, ContactStatus::Sent);
        assert_eq!(form.fields(), ContactFields::default());
    }

    #[test]
    fn rejected_submission_keeps_values_and_still_reenables() {
        let form = FormHarness::new(complete());
        let rejected = ContactError::Rejected { status: 422, message: Some("Email looks invalid".into()) };
        assert!(form.run(Err(rejected)));

        let waiting = form.while_waiting.borrow().clone().unwrap();
        assert!(waiting.disabled);
        assert_eq!(waiting.status, ContactStatus::Failed("Email looks invalid".into()));

        assert!(!form.submission().disabled);
        assert_eq!(form.fields(), complete());
    }

    #[test]
    fn network_failure_shows_generic_message_and_reenables() {
        let form = FormHarness::new(complete());
        assert!(form.run(Err(ContactError::Network("offline".into()))));

        assert!(form.while_waiting.borrow().as_ref().unwrap().disabled);
        assert!(!form.submission().disabled);
        assert_eq!(form.submission().status, ContactStatus::Failed(GENERIC_FAILURE.into()));
        assert_eq!(form.fields(), complete());
    }

    #[test]
    fn invalid_submit_does_not_unlock_a_pending_one() {
        let locked = Rc::new(Submission::default()).reduce(SubmissionAction::Sending);
        let after = locked.reduce(SubmissionAction::Invalid);
        assert!(after.disabled);
        assert_eq!(after.status, ContactStatus::Invalid);
    }
}
