pub mod address;
pub mod input;
pub mod origin;

pub use address::{AddressValidator, EthAddressValidator};
pub use input::{MAX_MESSAGE_BYTES, read_message};
pub use origin::{parse_url, resolve_origin};
