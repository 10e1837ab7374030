use crate::err::RadioError;

use super::{AssociatedNetwork, RadioControl};

/// Fallback provider for platforms with no radio control bindings.
pub struct UnsupportedRadioControl;

impl RadioControl for UnsupportedRadioControl {
    fn default_wifi_interface(&self) -> Result<String, RadioError> {
        Err(RadioError::Unsupported)
    }

    fn associated_network(&self, _iface: &str) -> Result<AssociatedNetwork, RadioError> {
        Err(RadioError::Unsupported)
    }

    fn supported_channels(&self, _iface: &str) -> Result<Vec<u32>, RadioError> {
        Err(RadioError::Unsupported)
    }

    fn disassociate(&self, _iface: &str) -> Result<(), RadioError> {
        Err(RadioError::Unsupported)
    }

    fn set_channel(&self, _iface: &str, _channel: u32) -> Result<(), RadioError> {
        Err(RadioError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operation_reports_unsupported() {
        let radio = UnsupportedRadioControl;
        assert!(matches!(radio.default_wifi_interface(), Err(RadioError::Unsupported)));
        assert!(matches!(radio.set_channel("en0", 6), Err(RadioError::Unsupported)));
    }
}
