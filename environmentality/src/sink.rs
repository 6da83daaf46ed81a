//! Error accumulation and reporting

use std::fmt;

/// Header line of the validation report.
pub const REPORT_HEADER: &str = "During environmentality validation the following errors occurred:";

/// Category of a recorded error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingRequired,
    InvalidValue,
    InvalidDefault,
    UnsupportedType,
    FileRead,
}

/// One recorded error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub message: String,
}

/// Callback receiving every recorded message, in order.
pub type ErrorCallback = Box<dyn FnMut(&[String]) + Send>;

/// What [`ErrorSink::finish`] does when errors were recorded.
#[derive(Default)]
pub enum ErrorPolicy {
    /// Print the report to stderr and exit the process with status 1.
    #[default]
    Exit,
    /// Hand the messages to a callback.
    Callback(ErrorCallback),
    /// Keep the errors for the caller to inspect.
    Collect,
}

impl ErrorPolicy {
    pub fn callback<F>(f: F) -> Self
    where
        F: FnMut(&[String]) + Send + 'static,
    {
        ErrorPolicy::Callback(Box::new(f))
    }
}

impl fmt::Debug for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Exit => f.write_str("Exit"),
            ErrorPolicy::Callback(_) => f.write_str("Callback(..)"),
            ErrorPolicy::Collect => f.write_str("Collect"),
        }
    }
}

/// Ordered collection of validation errors.
#[derive(Debug, Default)]
pub struct ErrorSink {
    records: Vec<ErrorRecord>,
    policy: ErrorPolicy,
    finished: bool,
}

impl ErrorSink {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
            finished: false,
        }
    }

    /// Sink that only collects; `finish` is a no-op.
    pub fn collecting() -> Self {
        Self::new(ErrorPolicy::Collect)
    }

    pub fn add_error(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.records.push(ErrorRecord {
            kind,
            message: message.into(),
        });
    }

    pub fn missing_required(&mut self, name: &str) {
        self.add_error(
            ErrorKind::MissingRequired,
            format!("Missing required environment variable {name}"),
        );
    }

    pub fn invalid_value(&mut self, value: impl fmt::Display, name: &str, must_be: Option<&str>) {
        let message = match must_be {
            Some(must_be) => format!("Invalid value '{value}' for {name}, must be {must_be}"),
            None => format!("Invalid value '{value}' for {name}"),
        };
        self.add_error(ErrorKind::InvalidValue, message);
    }

    /// Not produced by coercion, since defaults are used verbatim; kept
    /// for callers validating defaults themselves.
    pub fn invalid_default(&mut self, value: impl fmt::Display, name: &str, must_be: Option<&str>) {
        let message = match must_be {
            Some(must_be) => {
                format!("Invalid default value '{value}' for {name}, must be {must_be}")
            }
            None => format!("Invalid default value '{value}' for {name}"),
        };
        self.add_error(ErrorKind::InvalidDefault, message);
    }

    pub fn unsupported_type(&mut self, ty: impl fmt::Display, name: &str) {
        self.add_error(
            ErrorKind::UnsupportedType,
            format!("Unsupported type '{ty}' for {name}"),
        );
    }

    pub fn file_read(&mut self, path: &str, name: &str, err: impl fmt::Display) {
        self.add_error(
            ErrorKind::FileRead,
            format!("Failed to read file '{path}' for {name}_FILE: {err}"),
        );
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn messages(&self) -> Vec<String> {
        self.records.iter().map(|r| r.message.clone()).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.records.is_empty()
    }

    /// Report text: the header followed by each message indented by two spaces.
    pub fn report(&self) -> String {
        format_report(self.records.iter().map(|r| r.message.as_str()))
    }

    /// Apply the policy once, if any errors were recorded.
    ///
    /// With [`ErrorPolicy::Exit`] this does not return.
    pub fn finish(&mut self) {
        if self.finished || !self.has_errors() {
            return;
        }
        self.finished = true;

        match &mut self.policy {
            ErrorPolicy::Exit => {
                let report = format_report(self.records.iter().map(|r| r.message.as_str()));
                eprintln!("{report}");
                std::process::exit(1);
            }
            ErrorPolicy::Callback(callback) => {
                let messages: Vec<String> =
                    self.records.iter().map(|r| r.message.clone()).collect();
                callback(&messages);
            }
            ErrorPolicy::Collect => {}
        }
    }
}

pub(crate) fn format_report<'a>(messages: impl IntoIterator<Item = &'a str>) -> String {
    let mut report = String::from(REPORT_HEADER);
    for message in messages {
        report.push_str("\n  ");
        report.push_str(message);
    }
    report
}
