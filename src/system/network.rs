// Network probing - 외부로 나가는 인터페이스의 로컬 IP 조회

use std::net::{IpAddr, SocketAddr, UdpSocket};

/// 라우팅 경로 결정을 위한 외부 주소 (실제로 패킷은 보내지 않음)
const PROBE_ADDR: &str = "8.8.8.8:80";

/// 표시 불가 시 문구
pub const UNAVAILABLE: &str = "Unavailable";

/// 기본 경로의 로컬 IP 주소
///
/// UDP 소켓은 connect 시 라우팅만 결정하므로 네트워크가 없으면 실패한다.
pub fn local_ip_address() -> Option<IpAddr> {
    probe_via(PROBE_ADDR.parse().ok()?)
}

fn probe_via(target: SocketAddr) -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect(target).ok()?;
    let ip = socket.local_addr().ok()?.ip();
    if ip.is_unspecified() {
        None
    } else {
        Some(ip)
    }
}

/// 화면 표시용 IP 문자열
pub fn probe_ip_label() -> String {
    match local_ip_address() {
        Some(ip) => ip.to_string(),
        None => UNAVAILABLE.to_string(),
    }
}
