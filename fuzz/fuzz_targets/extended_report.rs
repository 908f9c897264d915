#![no_main]
use libfuzzer_sys::fuzz_target;

use bytes::Bytes;
use rtcp_xr::extended_report::ExtendedReport;
use util::marshal::{Marshal, Unmarshal};

fuzz_target!(|data: &[u8]| {
    let mut bytes = Bytes::from(data.to_vec());
    if let Ok(xr) = ExtendedReport::unmarshal(&mut bytes) {
        // whatever decodes must encode back to the same length
        let raw = xr.marshal().unwrap();
        assert_eq!(raw.len(), data.len());
    }
});
