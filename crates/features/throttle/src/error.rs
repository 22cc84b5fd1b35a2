use std::borrow::Cow;

#[jobchat_derive::jobchat_error]
pub enum ThrottleError {
    /// The cap or window is outside the accepted range.
    #[error("Invalid throttle configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
