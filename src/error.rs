use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Packet length does not match the region being decoded.
    #[error("Packet too short to be read")]
    PacketTooShort,
    /// Buffer is too short.
    #[error("Buffer too short to be written")]
    BufferTooShort,
    /// Header packet type does not match the packet being decoded.
    #[error("Wrong packet type")]
    WrongPacketType,
    /// Invalid packet version.
    #[error("Invalid packet version")]
    BadVersion,
    /// Packet contains an invalid header.
    #[error("Invalid header")]
    InvalidHeader,
    /// Extended report has no report block to encode.
    #[error("Extended report is missing its report block")]
    MissingReportBlock,
}

impl From<Error> for util::Error {
    fn from(e: Error) -> Self {
        util::Error::from_std(e)
    }
}

impl PartialEq<util::Error> for Error {
    fn eq(&self, other: &util::Error) -> bool {
        if let Some(down) = other.downcast_ref::<Error>() {
            return self == down;
        }
        false
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_through_util_error() {
        let wrapped: util::Error = Error::WrongPacketType.into();
        assert_eq!(Error::WrongPacketType, wrapped);
        assert_ne!(Error::PacketTooShort, wrapped);

        let foreign = util::Error::Other("not ours".to_owned());
        assert_ne!(Error::PacketTooShort, foreign);
    }
}
