//! Endpoint-specific API implementations
//!
//! Each module maps one resource group of the sipgate REST API onto
//! [`Endpoint`](crate::endpoint::Endpoint) descriptions.
//!
//! | Module | Paths |
//! |--------|-------|
//! | `sessions` | `/authorization/*`, `/sessions/*` |
//! | `app` | `/translations/*`, `/app/*` |
//! | `account` | `/account`, `/balance`, `/addresses`, `/identityVerification`, `/restrictions` |
//! | `users` | `/users/*` |
//! | `devices` | `/devices/*`, `/{userId}/devices/*` |
//! | `phonelines` | `/{userId}/phonelines/*` |
//! | `faxlines` | `/{userId}/faxlines/*`, `/groupfaxlines/*` |
//! | `groups` | `/groups/*` |
//! | `numbers` | `/{userId}/numbers`, `/numbers/*`, `/portings/*` |
//! | `sms` | `/{userId}/sms/*` |
//! | `contacts` | `/contacts/*` |
//! | `history` | `/{userId}/history/*` |
//! | `notifications` | `/{userId}/notifications/*` |

pub mod account;
pub mod app;
pub mod contacts;
pub mod devices;
pub mod faxlines;
pub mod groups;
pub mod history;
pub mod notifications;
pub mod numbers;
pub mod phonelines;
pub mod sessions;
pub mod sms;
pub mod users;

pub use account::{AccountApi, Restrictions};
pub use app::AppApi;
pub use contacts::ContactsApi;
pub use devices::DevicesApi;
pub use faxlines::FaxlinesApi;
pub use groups::GroupsApi;
pub use history::{HistoryApi, HistoryFilter};
pub use notifications::NotificationsApi;
pub use numbers::NumbersApi;
pub use phonelines::PhonelinesApi;
pub use sessions::SessionsApi;
pub use sms::SmsApi;
pub use users::UsersApi;
