pub mod credentials;
pub mod session;

pub use session::AdminSession;
