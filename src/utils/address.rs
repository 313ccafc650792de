/// Capability to decide whether a string is a syntactically valid account address.
///
/// The parser only asks yes/no; it never normalizes or checksums the address,
/// so the committed value is exactly what the message contained.
pub trait AddressValidator {
    fn is_valid_address(&self, address: &str) -> bool;
}

impl<F> AddressValidator for F
where
    F: Fn(&str) -> bool,
{
    fn is_valid_address(&self, address: &str) -> bool {
        self(address)
    }
}

const ADDRESS_PREFIX: &str = "0x";
const ADDRESS_HEX_LEN: usize = 40;

/// Ethereum account addresses: `0x` followed by exactly 40 hex digits.
///
/// Mixed case is accepted without EIP-55 checksum verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthAddressValidator;

impl AddressValidator for EthAddressValidator {
    fn is_valid_address(&self, address: &str) -> bool {
        match address.strip_prefix(ADDRESS_PREFIX) {
            Some(hex) => {
                hex.len() == ADDRESS_HEX_LEN && hex.bytes().all(|b| b.is_ascii_hexdigit())
            }
            None => false,
        }
    }
}
