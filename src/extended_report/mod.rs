
pub mod vm;

use std::any::Any;
use std::fmt;

use bytes::{Buf, BufMut};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use util::marshal::{Marshal, MarshalSize, Unmarshal};
pub use vm::{
    VoIPMetricsReportBlock, VM_BLOCK_LENGTH_WORDS, VM_REPORT_BLOCK_LENGTH, VOIP_METRICS_BLOCK_TYPE,
};

use crate::error;
use crate::header::{Header, PacketType, HEADER_LENGTH, SSRC_LENGTH};
use crate::packet::Packet;

type Result<T> = std::result::Result<T, util::Error>;

/// Payload size that follows the RTCP header: sender SSRC plus one
/// VoIP Metrics Report Block.
pub const XR_PAYLOAD_LENGTH: usize = SSRC_LENGTH + VM_REPORT_BLOCK_LENGTH;

/// The ExtendedReport packet is an Implementation of RTCP Extended
/// reports defined in RFC 3611, restricted to a single VoIP Metrics
/// Report Block. The layout is fixed: 4 bytes of header, 4 bytes of
/// sender ssrc and a 36 byte report block.
///
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P|reserved |   PT=XR=207   |             length            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                              ssrc                             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// :                  VoIP metrics report block                    :
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Debug, PartialEq, Eq, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtendedReport {
    /// The synchronization source identifier for the originator of this XR packet.
    #[cfg_attr(feature = "serde", serde(rename = "XRSSRC"))]
    pub sender_ssrc: u32,
    #[cfg_attr(feature = "serde", serde(rename = "VoIPMetricsReport"))]
    pub report: Option<VoIPMetricsReportBlock>,
}

impl fmt::Display for ExtendedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl ExtendedReport {
    pub fn originator_ssrc(&self) -> u32 {
        self.sender_ssrc
    }
}

impl Packet for ExtendedReport {
    /// Header returns the Header associated with this packet.
    fn header(&self) -> Header {
        Header::for_packet(PacketType::ExtendedReport, self.marshal_size())
    }

    /// An extended report names no destination SSRCs, even though its
    /// report block carries a source SSRC.
    fn destination_ssrc(&self) -> Vec<u32> {
        vec![]
    }

    fn raw_size(&self) -> usize {
        let report_length = self.report.as_ref().map_or(0, |r| r.marshal_size());
        HEADER_LENGTH + SSRC_LENGTH + report_length
    }

    fn as_any(&self) -> &(dyn Any + Send + Sync) {
        self
    }

    fn equal(&self, other: &(dyn Packet + Send + Sync)) -> bool {
        other
            .as_any()
            .downcast_ref::<ExtendedReport>()
            .map_or(false, |a| self == a)
    }

    fn cloned(&self) -> Box<dyn Packet + Send + Sync> {
        Box::new(self.clone())
    }
}

impl MarshalSize for ExtendedReport {
    fn marshal_size(&self) -> usize {
        // every part is a whole number of 32-bit words, no padding needed
        self.raw_size()
    }
}

impl Marshal for ExtendedReport {
    /// marshal_to encodes the ExtendedReport in binary
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        let report = match &self.report {
            Some(report) => report,
            None => {
                log::trace!(
                    "refusing to marshal XR from ssrc {:#010x} without a report block",
                    self.sender_ssrc
                );
                return Err(error::Error::MissingReportBlock.into());
            }
        };

        if buf.remaining_mut() < self.marshal_size() {
            return Err(error::Error::BufferTooShort.into());
        }

        let h = self.header();
        let n = h.marshal_to(buf)?;
        buf = &mut buf[n..];

        buf.put_u32(self.sender_ssrc);

        report.marshal_to(buf)?;

        Ok(self.marshal_size())
    }
}

impl Unmarshal for ExtendedReport {
    /// Unmarshal decodes the ExtendedReport from binary
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self>
    where
        Self: Sized,
        B: Buf,
    {
        if raw_packet.remaining() < (HEADER_LENGTH + SSRC_LENGTH) {
            return Err(error::Error::PacketTooShort.into());
        }

        let header = Header::unmarshal(raw_packet)?;
        if header.packet_type != PacketType::ExtendedReport {
            return Err(error::Error::WrongPacketType.into());
        }

        // the layout is fixed, so trailing bytes are rejected as well
        if raw_packet.remaining() != XR_PAYLOAD_LENGTH {
            return Err(error::Error::PacketTooShort.into());
        }

        let sender_ssrc = raw_packet.get_u32();

        if raw_packet.remaining() != VM_REPORT_BLOCK_LENGTH {
            return Err(error::Error::PacketTooShort.into());
        }

        let report = VoIPMetricsReportBlock::unmarshal(raw_packet)?;

        Ok(ExtendedReport {
            sender_ssrc,
            report: Some(report),
        })
    }
}
