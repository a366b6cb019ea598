use serde::{Deserialize, Serialize};
use data_encoding::BASE64;
use crate::errors::GateError;

const PEM_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const PEM_END: &str = "-----END CERTIFICATE-----";

/// DER certificates of one TLS connection, root first.
///
/// Index 0 is the root CA's certificate and the last entry is the server's
/// leaf certificate. The trust service reads the chain in this order.
/// On the wire each entry is a JSON array of byte values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateChain(Vec<Vec<u8>>);

impl CertificateChain {
    /// Build a chain from DER entries already ordered root first.
    pub fn from_root_first(entries: Vec<Vec<u8>>) -> Self {
        Self(entries)
    }

    /// Build a chain from DER entries ordered leaf first, as most TLS stacks
    /// report them.
    pub fn from_leaf_first(mut entries: Vec<Vec<u8>>) -> Self {
        entries.reverse();
        Self(entries)
    }

    /// Decode every certificate block of a PEM bundle, keeping file order.
    pub fn from_pem(pem: &str) -> Result<Self, GateError> {
        Ok(Self(parse_pem_blocks(pem)?))
    }

    pub fn entries(&self) -> &[Vec<u8>] {
        &self.0
    }

    pub fn leaf(&self) -> Option<&[u8]> {
        self.0.last().map(Vec::as_slice)
    }

    pub fn root(&self) -> Option<&[u8]> {
        self.0.first().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Read one certificate file that may be PEM (one or more blocks) or raw DER.
pub fn decode_certificate_file(bytes: &[u8]) -> Result<Vec<Vec<u8>>, GateError> {
    // DER always starts with a SEQUENCE tag
    if bytes.first() == Some(&0x30) {
        return Ok(vec![bytes.to_vec()]);
    }
    let text = std::str::from_utf8(bytes)
        .map_err(|_| GateError::Certificate("file is neither DER nor PEM".into()))?;
    parse_pem_blocks(text)
}

fn parse_pem_blocks(pem: &str) -> Result<Vec<Vec<u8>>, GateError> {
    let mut certs = Vec::new();
    let mut current: Option<String> = None;

    for line in pem.lines().map(str::trim) {
        if line == PEM_BEGIN {
            if current.is_some() {
                return Err(GateError::Certificate("nested BEGIN CERTIFICATE marker".into()));
            }
            current = Some(String::new());
        } else if line == PEM_END {
            let body = current.take()
                .ok_or_else(|| GateError::Certificate("END CERTIFICATE without BEGIN".into()))?;
            let der = BASE64.decode(body.as_bytes())
                .map_err(|e| GateError::Certificate(format!("invalid base64 in PEM block: {}", e)))?;
            certs.push(der);
        } else if let Some(body) = current.as_mut() {
            body.push_str(line);
        }
    }

    if current.is_some() {
        return Err(GateError::Certificate("unterminated PEM block".into()));
    }
    if certs.is_empty() {
        return Err(GateError::Certificate("no certificate found".into()));
    }
    Ok(certs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pem_of(der: &[u8]) -> String {
        format!("{}\n{}\n{}\n", PEM_BEGIN, BASE64.encode(der), PEM_END)
    }

    #[test]
    fn test_leaf_first_is_reversed() {
        let chain = CertificateChain::from_leaf_first(vec![vec![3], vec![2], vec![1]]);
        assert_eq!(chain.root(), Some(&[1u8][..]));
        assert_eq!(chain.leaf(), Some(&[3u8][..]));
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_chain_serializes_as_byte_arrays() {
        let chain = CertificateChain::from_root_first(vec![vec![0x30, 0x01], vec![0xff]]);
        let json = serde_json::to_string(&chain).unwrap();
        assert_eq!(json, "[[48,1],[255]]");
        let back: CertificateChain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chain);
    }

    #[test]
    fn test_pem_bundle_keeps_order() {
        let bundle = format!("{}{}", pem_of(&[0x30, 0xaa]), pem_of(&[0x30, 0xbb]));
        let chain = CertificateChain::from_pem(&bundle).unwrap();
        assert_eq!(chain.entries(), &[vec![0x30, 0xaa], vec![0x30, 0xbb]]);
    }

    #[test]
    fn test_pem_without_blocks_fails() {
        assert!(CertificateChain::from_pem("hello").is_err());
    }

    #[test]
    fn test_unterminated_pem_fails() {
        let text = format!("{}\nMAo=\n", PEM_BEGIN);
        assert!(CertificateChain::from_pem(&text).is_err());
    }

    #[test]
    fn test_decode_raw_der_file() {
        let der = vec![0x30, 0x03, 0x02, 0x01, 0x01];
        assert_eq!(decode_certificate_file(&der).unwrap(), vec![der]);
    }

    #[test]
    fn test_decode_pem_file() {
        let file = pem_of(&[0x30, 0x00]);
        assert_eq!(decode_certificate_file(file.as_bytes()).unwrap(), vec![vec![0x30, 0x00]]);
    }
}
