//! Service → risk profile reference data

use super::{RiskTier, ServiceCategory};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Risk tier with rationale and mitigation for one service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskProfile {
    /// Attack scenario family; `None` only for the fallback profile
    pub category: Option<ServiceCategory>,
    pub tier: RiskTier,
    pub rationale: &'static str,
    pub mitigation: &'static str,
}

impl RiskProfile {
    const fn new(
        category: ServiceCategory,
        tier: RiskTier,
        rationale: &'static str,
        mitigation: &'static str,
    ) -> Self {
        Self {
            category: Some(category),
            tier,
            rationale,
            mitigation,
        }
    }
}

/// Returned for any label the catalog does not know
pub const FALLBACK_PROFILE: RiskProfile = RiskProfile {
    category: None,
    tier: RiskTier::Medium,
    rationale: "Non-standard or unidentified service",
    mitigation: "Verify necessity; restrict access; monitor",
};

use super::RiskTier::{High, Low, Medium};
use super::ServiceCategory::{Database, FileSharing, Infrastructure, Mail, RemoteAccess, Web};

const PROFILES: &[(&str, RiskProfile)] = &[
    // Remote access
    ("Telnet", RiskProfile::new(RemoteAccess, High,
        "Unencrypted protocol transmitting credentials in plaintext",
        "Replace with SSH. Disable Telnet service immediately.")),
    ("RDP", RiskProfile::new(RemoteAccess, High,
        "Common target for brute-force attacks and exploitation",
        "Use VPN for access. Enable Network Level Authentication. Implement MFA.")),
    ("VNC", RiskProfile::new(RemoteAccess, High,
        "Often configured with weak passwords or no encryption",
        "Use SSH tunneling. Implement strong authentication. Consider alternatives.")),
    ("WinRM", RiskProfile::new(RemoteAccess, High,
        "Remote management endpoint enabling command execution",
        "Restrict to management networks. Require HTTPS transport and Kerberos authentication.")),
    ("Rexec", RiskProfile::new(RemoteAccess, High,
        "Legacy remote execution with cleartext passwords",
        "Disable the r-services entirely. Use SSH.")),
    ("Rlogin", RiskProfile::new(RemoteAccess, High,
        "Legacy remote login relying on host-based trust",
        "Disable rlogin. Remove .rhosts trust files. Use SSH.")),
    ("RSH", RiskProfile::new(RemoteAccess, High,
        "Unauthenticated remote shell based on host trust",
        "Disable RSH. Use SSH with key-based authentication.")),
    ("SSH", RiskProfile::new(RemoteAccess, Low,
        "Secure but requires proper configuration",
        "Disable password auth. Use key-based authentication. Change default port.")),
    // File transfer and sharing
    ("FTP", RiskProfile::new(FileSharing, High,
        "Unencrypted file transfer with plaintext authentication",
        "Use SFTP or FTPS. Configure with strong authentication.")),
    ("FTP-DATA", RiskProfile::new(FileSharing, Low,
        "FTP data channel (assess based on FTP configuration)",
        "Secure if using FTPS. Otherwise follow FTP mitigation strategies.")),
    ("TFTP", RiskProfile::new(FileSharing, High,
        "Trivial file transfer with no authentication at all",
        "Disable TFTP or restrict it to isolated provisioning networks.")),
    ("SMB", RiskProfile::new(FileSharing, High,
        "Vulnerable to ransomware and lateral movement attacks",
        "Restrict access with firewall rules. Keep SMB version updated. Enable SMB signing.")),
    ("NetBIOS-SSN", RiskProfile::new(FileSharing, High,
        "Legacy Windows file sharing session service",
        "Disable NetBIOS over TCP/IP. Block port 139 at the perimeter.")),
    ("NFS", RiskProfile::new(FileSharing, High,
        "Network file system exports often trust client-supplied identities",
        "Restrict exports by host. Use root_squash. Prefer NFSv4 with Kerberos.")),
    ("Rsync", RiskProfile::new(FileSharing, Medium,
        "Rsync daemon modules may allow anonymous read or write",
        "Require authentication on every module. Tunnel over SSH.")),
    // Databases and data stores
    ("MySQL", RiskProfile::new(Database, High,
        "Database exposed to internet increases attack surface",
        "Bind to localhost only. Use firewall rules. Implement strong passwords.")),
    ("PostgreSQL", RiskProfile::new(Database, High,
        "Database service should not be publicly accessible",
        "Restrict to internal network. Use pg_hba.conf properly. Enable SSL.")),
    ("MSSQL", RiskProfile::new(Database, High,
        "SQL Server exposure invites credential attacks and exploitation",
        "Restrict to application hosts. Disable the sa account. Enforce encryption.")),
    ("Oracle", RiskProfile::new(Database, High,
        "Database listener exposed to untrusted networks",
        "Restrict listener access with valid node checking. Patch regularly.")),
    ("Redis", RiskProfile::new(Database, High,
        "In-memory store frequently deployed without authentication",
        "Bind to localhost. Enable ACLs and protected mode. Never expose publicly.")),
    ("MongoDB", RiskProfile::new(Database, High,
        "Document database historically exposed without authentication",
        "Enable authentication. Bind to internal interfaces. Enable TLS.")),
    ("Elasticsearch", RiskProfile::new(Database, High,
        "Search cluster API can expose or delete indexed data",
        "Enable security features and TLS. Restrict the HTTP API to trusted hosts.")),
    ("Memcached", RiskProfile::new(Database, High,
        "Unauthenticated cache abusable for data leaks and amplification",
        "Bind to localhost. Disable UDP. Firewall the port.")),
    // Web
    ("HTTP", RiskProfile::new(Web, Medium,
        "Unencrypted web traffic vulnerable to interception",
        "Implement HTTPS with valid SSL/TLS certificates. Redirect HTTP to HTTPS.")),
    ("HTTPS", RiskProfile::new(Web, Low,
        "Encrypted web service (validate certificate and configuration)",
        "Keep SSL/TLS updated. Use strong ciphers. Monitor certificate expiration.")),
    ("HTTP-Proxy", RiskProfile::new(Web, Medium,
        "Proxy service may allow unauthorized access",
        "Implement authentication. Restrict access by IP whitelist.")),
    ("HTTPS-Alt", RiskProfile::new(Web, Medium,
        "Non-standard HTTPS port may be misconfigured",
        "Ensure proper SSL/TLS configuration. Use standard ports when possible.")),
    ("HTTP-Alt", RiskProfile::new(Web, Medium,
        "Alternate web port often hosts development or admin interfaces",
        "Remove development services from exposed hosts. Require authentication.")),
    ("SOCKS", RiskProfile::new(Web, Medium,
        "Open proxy can relay attacker traffic into the network",
        "Require authentication. Restrict clients by source address.")),
    // Mail
    ("SMTP", RiskProfile::new(Mail, Medium,
        "Mail server can be abused for spam or relay attacks",
        "Configure SPF, DKIM, DMARC. Disable open relay. Use authentication.")),
    ("SMTPS", RiskProfile::new(Mail, Low,
        "Encrypted mail submission (validate relay configuration)",
        "Keep TLS configuration current. Require authentication for relay.")),
    ("SMTP-Submission", RiskProfile::new(Mail, Low,
        "Authenticated mail submission port",
        "Enforce STARTTLS and authentication. Rate-limit submissions.")),
    ("POP3", RiskProfile::new(Mail, Medium,
        "Unencrypted email retrieval protocol",
        "Use POP3S (SSL/TLS). Consider IMAP with encryption instead.")),
    ("POP3S", RiskProfile::new(Mail, Low,
        "Encrypted email retrieval",
        "Keep TLS configuration current. Enforce strong authentication.")),
    ("IMAP", RiskProfile::new(Mail, Medium,
        "Email protocol without encryption",
        "Use IMAPS (SSL/TLS). Enforce strong authentication.")),
    ("IMAPS", RiskProfile::new(Mail, Low,
        "Encrypted mailbox access",
        "Keep TLS configuration current. Monitor for password spraying.")),
    // Directory and infrastructure
    ("DNS", RiskProfile::new(Infrastructure, Medium,
        "DNS server may be vulnerable to amplification attacks",
        "Restrict recursive queries. Implement rate limiting. Use DNSSEC.")),
    ("LDAP", RiskProfile::new(Infrastructure, Medium,
        "Directory service may disclose accounts via anonymous binds",
        "Disable anonymous binds. Require LDAPS or StartTLS.")),
    ("LDAPS", RiskProfile::new(Infrastructure, Low,
        "Encrypted directory access",
        "Restrict to internal clients. Monitor bind failures.")),
    ("Kerberos", RiskProfile::new(Infrastructure, Medium,
        "Authentication service exposes accounts to roasting attacks",
        "Restrict to internal networks. Enforce strong service account passwords.")),
    ("SNMP", RiskProfile::new(Infrastructure, Medium,
        "Management protocol often left with default community strings",
        "Use SNMPv3 with authentication. Change default communities. Restrict managers.")),
    ("NTP", RiskProfile::new(Infrastructure, Medium,
        "Time service can be abused for amplification",
        "Disable monlist. Restrict queries to known clients.")),
    ("RPCBind", RiskProfile::new(Infrastructure, Medium,
        "Portmapper reveals registered RPC services",
        "Block from untrusted networks. Disable if NFS/NIS are unused.")),
    ("MSRPC", RiskProfile::new(Infrastructure, Medium,
        "Windows RPC endpoint mapper enables service enumeration",
        "Block at the perimeter. Limit to domain-internal traffic.")),
    ("NetBIOS-NS", RiskProfile::new(Infrastructure, Medium,
        "Name service leaks host and domain information",
        "Disable NetBIOS over TCP/IP where not required.")),
    ("Docker", RiskProfile::new(Infrastructure, High,
        "Unauthenticated container API grants root-equivalent host control",
        "Never expose the Docker socket over TCP. Use TLS client certificates if remote access is required.")),
    ("Kubernetes-API", RiskProfile::new(Infrastructure, High,
        "Cluster control plane exposed to untrusted networks",
        "Restrict API server access. Disable anonymous auth. Enforce RBAC.")),
    ("AMQP", RiskProfile::new(Infrastructure, Medium,
        "Message broker may accept default guest credentials",
        "Remove default accounts. Enable TLS. Restrict to application hosts.")),
    ("PPTP", RiskProfile::new(Infrastructure, Medium,
        "Legacy VPN protocol with broken authentication",
        "Migrate to IPsec or WireGuard. Disable PPTP.")),
];

static BUILTIN: Lazy<RiskCatalog> = Lazy::new(RiskCatalog::new);

/// Immutable lookup table from service label to risk profile
#[derive(Debug, Clone)]
pub struct RiskCatalog {
    profiles: HashMap<&'static str, RiskProfile>,
}

impl Default for RiskCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskCatalog {
    pub fn new() -> Self {
        Self {
            profiles: PROFILES.iter().copied().collect(),
        }
    }

    /// Process-wide instance built on first use
    pub fn builtin() -> &'static RiskCatalog {
        &BUILTIN
    }

    /// Resolve a service label. Never fails: unknown labels get the fallback.
    pub fn lookup(&self, service: &str) -> &RiskProfile {
        self.profiles.get(service).unwrap_or(&FALLBACK_PROFILE)
    }

    pub fn contains(&self, service: &str) -> bool {
        self.profiles.contains_key(service)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
