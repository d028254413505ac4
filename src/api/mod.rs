pub mod econumo;
pub mod open_exchange_rates;
pub mod transport;

pub use econumo::EconumoClient;
pub use open_exchange_rates::OpenExchangeRatesClient;
pub use transport::{HttpTransport, ReqwestTransport};
