//! Static port → service label table

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Label for ports absent from the table. The risk catalog resolves it to
/// its fallback profile.
pub const UNKNOWN_SERVICE: &str = "Unknown";

/// Well-known and commonly targeted TCP ports
pub const WELL_KNOWN_SERVICES: &[(u16, &str)] = &[
    (20, "FTP-DATA"),
    (21, "FTP"),
    (22, "SSH"),
    (23, "Telnet"),
    (25, "SMTP"),
    (53, "DNS"),
    (69, "TFTP"),
    (80, "HTTP"),
    (88, "Kerberos"),
    (110, "POP3"),
    (111, "RPCBind"),
    (123, "NTP"),
    (135, "MSRPC"),
    (137, "NetBIOS-NS"),
    (139, "NetBIOS-SSN"),
    (143, "IMAP"),
    (161, "SNMP"),
    (389, "LDAP"),
    (443, "HTTPS"),
    (445, "SMB"),
    (465, "SMTPS"),
    (512, "Rexec"),
    (513, "Rlogin"),
    (514, "RSH"),
    (587, "SMTP-Submission"),
    (636, "LDAPS"),
    (873, "Rsync"),
    (993, "IMAPS"),
    (995, "POP3S"),
    (1080, "SOCKS"),
    (1433, "MSSQL"),
    (1521, "Oracle"),
    (1723, "PPTP"),
    (2049, "NFS"),
    (2375, "Docker"),
    (3306, "MySQL"),
    (3389, "RDP"),
    (5432, "PostgreSQL"),
    (5672, "AMQP"),
    (5900, "VNC"),
    (5985, "WinRM"),
    (6379, "Redis"),
    (6443, "Kubernetes-API"),
    (8080, "HTTP-Proxy"),
    (8443, "HTTPS-Alt"),
    (8888, "HTTP-Alt"),
    (9200, "Elasticsearch"),
    (11211, "Memcached"),
    (27017, "MongoDB"),
];

static SERVICE_TABLE: Lazy<HashMap<u16, &'static str>> =
    Lazy::new(|| WELL_KNOWN_SERVICES.iter().copied().collect());

/// Map a port number to its canonical service label
pub fn identify(port: u16) -> &'static str {
    SERVICE_TABLE.get(&port).copied().unwrap_or(UNKNOWN_SERVICE)
}

/// True when `port` has an entry in the table
pub fn is_well_known(port: u16) -> bool {
    SERVICE_TABLE.contains_key(&port)
}
