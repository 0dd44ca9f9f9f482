//! Input classification shared by every provider.
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// The shape of a `geocode` input
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Free text, including the empty string
    Address,
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
}

impl InputKind {
    pub fn of(input: &str) -> Self {
        match input.parse::<IpAddr>() {
            Ok(IpAddr::V4(ip)) => InputKind::Ipv4(ip),
            Ok(IpAddr::V6(ip)) => InputKind::Ipv6(ip),
            Err(_) => InputKind::Address,
        }
    }

    pub fn is_ip(&self) -> bool {
        !matches!(self, InputKind::Address)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn detects_ipv4() {
        assert_eq!(
            InputKind::of("127.0.0.1"),
            InputKind::Ipv4(Ipv4Addr::LOCALHOST)
        );
        assert!(InputKind::of("74.200.247.59").is_ip());
    }

    #[test]
    fn detects_ipv6() {
        assert_eq!(InputKind::of("::1"), InputKind::Ipv6(Ipv6Addr::LOCALHOST));
        assert!(matches!(
            InputKind::of("::ffff:88.188.221.14"),
            InputKind::Ipv6(_)
        ));
    }

    #[test]
    fn everything_else_is_an_address() {
        assert_eq!(InputKind::of(""), InputKind::Address);
        assert_eq!(InputKind::of("foobar"), InputKind::Address);
        assert_eq!(InputKind::of("1.000000,2.000000"), InputKind::Address);
        assert_eq!(InputKind::of("256.1.1.1"), InputKind::Address);
        assert!(!InputKind::of("10 avenue Gambetta, Paris, France").is_ip());
    }
}
