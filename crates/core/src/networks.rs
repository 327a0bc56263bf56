//! Mapping from host ecosystem/network names to archive dataset ids.

/// Returns the archive dataset identifier for an ecosystem/network pair.
///
/// Most pairs concatenate directly (`ethereum` + `mainnet` →
/// `ethereum-mainnet`); the exceptions follow the registry's naming.
pub fn network_id(ecosystem: &str, network: &str) -> String {
    match (ecosystem, network) {
        ("bsc", network) => format!("binance-{network}"),
        ("arbitrum", "mainnet") => "arbitrum-one".to_string(),
        (ecosystem, network) => format!("{ecosystem}-{network}"),
    }
}
