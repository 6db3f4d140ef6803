use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("{0} not set")]
    MissingConfig(&'static str),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{channel} returned status {status}")]
    Status { channel: &'static str, status: u16 },
}
