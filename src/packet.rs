use std::any::Any;
use std::fmt;

use util::marshal::{Marshal, Unmarshal};

use crate::header::Header;

/// Packet represents an RTCP packet, a protocol used for out-of-band statistics and
/// control information for an RTP session.
///
/// This is the surface a packet-type dispatcher works against once it has
/// routed a buffer by its header.
pub trait Packet: Marshal + Unmarshal + fmt::Display + fmt::Debug {
    fn header(&self) -> Header;
    /// destination_ssrc returns an array of ssrc values that this packet refers to.
    fn destination_ssrc(&self) -> Vec<u32>;
    /// raw_size is the encoded size before padding.
    fn raw_size(&self) -> usize;
    fn as_any(&self) -> &(dyn Any + Send + Sync);
    fn equal(&self, other: &(dyn Packet + Send + Sync)) -> bool;
    fn cloned(&self) -> Box<dyn Packet + Send + Sync>;
}

impl PartialEq for dyn Packet + Send + Sync {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Clone for Box<dyn Packet + Send + Sync> {
    fn clone(&self) -> Box<dyn Packet + Send + Sync> {
        self.cloned()
    }
}
