// Token issuance and per-token daily word quotas.
// In-memory only: a restart forgets every token and every window.

pub mod clock;
pub mod ledger;
pub mod token;
pub mod window;

pub use clock::{Clock, SystemClock};
pub use ledger::{QuotaLedger, Reservation, Usage};
pub use token::{Token, TokenRecord};
