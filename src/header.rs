use std::fmt;

use bytes::{Buf, BufMut};
use util::marshal::{Marshal, MarshalSize, Unmarshal};

use crate::error::Error;

pub const RTP_VERSION: u8 = 2;
pub const HEADER_LENGTH: usize = 4;
pub const SSRC_LENGTH: usize = 4;

/// Packet type code of an Extended Report, RFC 3611.
pub const TYPE_EXTENDED_REPORT: u8 = 207;

const VERSION_SHIFT: u8 = 6;
const PADDING_FLAG: u8 = 0x20;
const COUNT_MASK: u8 = 0x1f;

/// PacketType is the second octet of an RTCP header. Only Extended
/// Reports are told apart; any other code is carried as its raw value
/// so a dispatcher can still route on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PacketType {
    ExtendedReport,
    Other(u8),
}

impl From<u8> for PacketType {
    fn from(b: u8) -> Self {
        match b {
            TYPE_EXTENDED_REPORT => PacketType::ExtendedReport,
            other => PacketType::Other(other),
        }
    }
}

impl From<PacketType> for u8 {
    fn from(t: PacketType) -> Self {
        match t {
            PacketType::ExtendedReport => TYPE_EXTENDED_REPORT,
            PacketType::Other(b) => b,
        }
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketType::ExtendedReport => write!(f, "XR"),
            PacketType::Other(b) => write!(f, "PT={b}"),
        }
    }
}

/// Header is the 4 octet prefix shared by every RTCP packet.
///
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P|  count  |      PT       |             length            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Header {
    pub padding: bool,
    /// Five bits; reserved, and zero, for XR.
    pub count: u8,
    pub packet_type: PacketType,
    /// Packet length in 32-bit words minus one, header included.
    pub length: u16,
}

impl Header {
    /// for_packet builds the header of an unpadded packet that is `size`
    /// octets long, header included.
    pub fn for_packet(packet_type: PacketType, size: usize) -> Self {
        Header {
            padding: false,
            count: 0,
            packet_type,
            length: (size / 4).saturating_sub(1) as u16,
        }
    }
}

impl MarshalSize for Header {
    fn marshal_size(&self) -> usize {
        HEADER_LENGTH
    }
}

impl Marshal for Header {
    fn marshal_to(&self, mut buf: &mut [u8]) -> Result<usize, util::Error> {
        // count has no room beyond its five bits
        if self.count > COUNT_MASK {
            return Err(Error::InvalidHeader.into());
        }
        if buf.remaining_mut() < HEADER_LENGTH {
            return Err(Error::BufferTooShort.into());
        }

        let mut b0 = (RTP_VERSION << VERSION_SHIFT) | self.count;
        if self.padding {
            b0 |= PADDING_FLAG;
        }

        buf.put_u8(b0);
        buf.put_u8(self.packet_type.into());
        buf.put_u16(self.length);

        Ok(HEADER_LENGTH)
    }
}

impl Unmarshal for Header {
    fn unmarshal<B>(raw_packet: &mut B) -> Result<Self, util::Error>
    where
        Self: Sized,
        B: Buf,
    {
        if raw_packet.remaining() < HEADER_LENGTH {
            return Err(Error::PacketTooShort.into());
        }

        let b0 = raw_packet.get_u8();
        if b0 >> VERSION_SHIFT != RTP_VERSION {
            return Err(Error::BadVersion.into());
        }

        Ok(Header {
            padding: b0 & PADDING_FLAG != 0,
            count: b0 & COUNT_MASK,
            packet_type: raw_packet.get_u8().into(),
            length: raw_packet.get_u16(),
        })
    }
}

#[cfg(test)]
mod test {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn test_header_unmarshal() {
        let tests = vec![
            (
                "extended report",
                Bytes::from_static(&[0x80, 0xcf, 0x00, 0x0a]), // v=2, p=0, XR, len=10
                Ok(Header {
                    padding: false,
                    count: 0,
                    packet_type: PacketType::ExtendedReport,
                    length: 10,
                }),
            ),
            (
                "padded receiver report",
                Bytes::from_static(&[0xa1, 0xc9, 0x00, 0x07]), // v=2, p=1, count=1, RR, len=7
                Ok(Header {
                    padding: true,
                    count: 1,
                    packet_type: PacketType::Other(201),
                    length: 7,
                }),
            ),
            (
                "bad version",
                Bytes::from_static(&[0x40, 0xcf, 0x00, 0x0a]), // v=1
                Err(Error::BadVersion),
            ),
            (
                "short",
                Bytes::from_static(&[0x80, 0xcf, 0x00]),
                Err(Error::PacketTooShort),
            ),
        ];

        for (name, data, want) in tests {
            let got = Header::unmarshal(&mut data.clone());
            match want {
                Ok(want) => {
                    let got = got.unwrap_or_else(|err| panic!("Unmarshal {name}: {err}"));
                    assert_eq!(got, want, "Unmarshal {name}");
                }
                Err(want_err) => {
                    assert_eq!(want_err, got.unwrap_err(), "Unmarshal {name}");
                }
            }
        }
    }

    #[test]
    fn test_header_marshal() {
        let tests = vec![
            (
                "extended report",
                Header::for_packet(PacketType::ExtendedReport, 44),
                Ok(Bytes::from_static(&[0x80, 0xcf, 0x00, 0x0a])),
            ),
            (
                "padding and full count",
                Header {
                    padding: true,
                    count: 31,
                    packet_type: PacketType::Other(200),
                    length: 0xffff,
                },
                Ok(Bytes::from_static(&[0xbf, 0xc8, 0xff, 0xff])),
            ),
            (
                "count overflows five bits",
                Header {
                    padding: false,
                    count: 32,
                    packet_type: PacketType::ExtendedReport,
                    length: 0,
                },
                Err(Error::InvalidHeader),
            ),
        ];

        for (name, header, want) in tests {
            let got = header.marshal();
            match want {
                Ok(want) => {
                    let got = got.unwrap_or_else(|err| panic!("Marshal {name}: {err}"));
                    assert_eq!(got, want, "Marshal {name}");
                    let back = Header::unmarshal(&mut got.clone())
                        .unwrap_or_else(|err| panic!("Unmarshal {name}: {err}"));
                    assert_eq!(back, header, "{name} round trip");
                }
                Err(want_err) => {
                    assert_eq!(want_err, got.unwrap_err(), "Marshal {name}");
                }
            }
        }
    }

    #[test]
    fn test_header_marshal_short_buffer() {
        let h = Header::for_packet(PacketType::ExtendedReport, 44);
        let mut buf = [0u8; 3];
        assert_eq!(Error::BufferTooShort, h.marshal_to(&mut buf).unwrap_err());
    }

    #[test]
    fn test_header_for_packet_length() {
        assert_eq!(Header::for_packet(PacketType::ExtendedReport, 8).length, 1);
        assert_eq!(Header::for_packet(PacketType::ExtendedReport, 44).length, 10);
        assert_eq!(Header::for_packet(PacketType::ExtendedReport, 0).length, 0);
    }

    #[test]
    fn test_packet_type() {
        assert_eq!(PacketType::from(207), PacketType::ExtendedReport);
        assert_eq!(PacketType::from(200), PacketType::Other(200));
        assert_eq!(u8::from(PacketType::ExtendedReport), 207);
        assert_eq!(u8::from(PacketType::Other(201)), 201);
        assert_eq!(PacketType::ExtendedReport.to_string(), "XR");
        assert_eq!(PacketType::Other(204).to_string(), "PT=204");
    }
}
