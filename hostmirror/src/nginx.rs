use crate::{escape_for_regex, DomainMapping};

// Header values presented to the upstream so the mirror looks like an
// ordinary browser visit.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

// Response headers stripped before the reply reaches the client, mostly
// security policies that would break the mirrored page and banners that
// leak the upstream setup.
const HIDDEN_RESPONSE_HEADERS: [(&str, &str); 16] = [
    ("Server", "hide the upstream Server banner"),
    ("Content-Security-Policy", "drop the Content-Security-Policy header"),
    (
        "Content-Security-Policy-Report-Only",
        "drop the report-only Content-Security-Policy header",
    ),
    ("X-Frame-Options", "drop the X-Frame-Options header"),
    ("X-Content-Type-Options", "drop the X-Content-Type-Options header"),
    ("Referrer-Policy", "drop the Referrer-Policy header"),
    ("Permissions-Policy", "drop the Permissions-Policy header"),
    (
        "Strict-Transport-Security",
        "drop the Strict-Transport-Security header",
    ),
    (
        "Cross-Origin-Embedder-Policy",
        "drop the Cross-Origin-Embedder-Policy header",
    ),
    (
        "Cross-Origin-Opener-Policy",
        "drop the Cross-Origin-Opener-Policy header",
    ),
    (
        "Cross-Origin-Resource-Policy",
        "drop the Cross-Origin-Resource-Policy header",
    ),
    ("Via", "hide intermediate proxy hops reported in Via"),
    ("X-Powered-By", "hide the upstream technology stack in X-Powered-By"),
    ("CF-RAY", "hide the Cloudflare CF-RAY header"),
    ("CF-Cache-Status", "hide the Cloudflare CF-Cache-Status header"),
    ("X-XSS-Protection", "drop the legacy X-XSS-Protection header"),
];

/// Expands one mapping into an annotated nginx `location` block. Pure and
/// deterministic: equal mappings always produce byte-identical text.
///
/// The template is an ordered list of (annotation, directive) pairs; each
/// pair becomes a `# `-prefixed comment line followed by the directive
/// line, ready to paste into a server block.
pub fn render_mapping(mapping: &DomainMapping) -> String {
    let source = &mapping.source;
    let proxy = &mapping.proxy;
    let escaped_source = escape_for_regex(source);

    let mut pairs: Vec<(&str, String)> = vec![
        (
            "proxy every request path under this host",
            "location ^~ / {".to_string(),
        ),
        (
            "forward requests to the origin site over HTTPS",
            format!("    proxy_pass https://{source};"),
        ),
        (
            "present the origin domain as the Host header",
            format!("    proxy_set_header Host {source};"),
        ),
        (
            "use a common browser User-Agent for upstream requests",
            format!("    proxy_set_header User-Agent \"{BROWSER_USER_AGENT}\";"),
        ),
        (
            "set the Referer to the origin front page",
            format!("    proxy_set_header Referer \"https://{source}/\";"),
        ),
        (
            "set the Origin header to the origin site",
            format!("    proxy_set_header Origin \"https://{source}\";"),
        ),
        (
            "pass the client's real IP address upstream",
            "    proxy_set_header X-Real-IP $remote_addr;".to_string(),
        ),
        (
            "append the client IP to the forwarding chain",
            "    proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;".to_string(),
        ),
        (
            "tell the upstream which protocol the client used",
            "    proxy_set_header X-Forwarded-Proto $scheme;".to_string(),
        ),
        (
            "forward client cookies to the upstream unchanged",
            "    proxy_set_header Cookie $http_cookie;".to_string(),
        ),
        (
            "allow protocol upgrades such as WebSocket",
            "    proxy_set_header Upgrade $http_upgrade;".to_string(),
        ),
        (
            "pass the Connection header that goes with the upgrade",
            "    proxy_set_header Connection $http_connection;".to_string(),
        ),
        (
            "disable upstream compression so response bodies can be rewritten",
            "    proxy_set_header Accept-Encoding \"\";".to_string(),
        ),
        (
            "use a typical browser Accept header",
            format!("    proxy_set_header Accept \"{BROWSER_ACCEPT}\";"),
        ),
        (
            "use a typical browser language preference",
            format!("    proxy_set_header Accept-Language \"{BROWSER_ACCEPT_LANGUAGE}\";"),
        ),
        (
            "talk HTTP/1.1 to the upstream",
            "    proxy_http_version 1.1;".to_string(),
        ),
        (
            "size of a single proxy buffer",
            "    proxy_buffer_size 256k;".to_string(),
        ),
        (
            "number and size of the proxy buffers",
            "    proxy_buffers 8 256k;".to_string(),
        ),
        (
            "buffer budget while the reply streams to the client",
            "    proxy_busy_buffers_size 256k;".to_string(),
        ),
        (
            "enable SNI for the upstream TLS handshake",
            "    proxy_ssl_server_name on;".to_string(),
        ),
        (
            "host name to present during SNI",
            format!("    proxy_ssl_name {source};"),
        ),
        (
            "skip upstream certificate verification, switch on if needed",
            "    proxy_ssl_verify off;".to_string(),
        ),
        (
            "rewrite origin redirects to point at the mirror domain",
            format!("    proxy_redirect ~^https://{escaped_source}(.*)$ https://{proxy}$1;"),
        ),
        (
            "replace the origin domain with the mirror domain in HTML",
            format!("    sub_filter '{source}' '{proxy}';"),
        ),
        (
            "replace protocol-relative origin URLs in HTML as well",
            format!("    sub_filter \"//{source}\" \"//{proxy}\";"),
        ),
        (
            "replace every occurrence, not only the first",
            "    sub_filter_once off;".to_string(),
        ),
        (
            "restrict body rewriting to HTML responses",
            "    sub_filter_types text/html;".to_string(),
        ),
        (
            "rewrite cookie domains from the origin to this host",
            format!("    proxy_cookie_domain {source} $host;"),
        ),
        (
            "rewrite dotted parent-domain cookies likewise",
            format!("    proxy_cookie_domain .{source} .$host;"),
        ),
        (
            "keep cookie paths rooted",
            "    proxy_cookie_path / /;".to_string(),
        ),
    ];

    for (header, annotation) in HIDDEN_RESPONSE_HEADERS {
        pairs.push((annotation, format!("    proxy_hide_header {header};")));
    }

    pairs.push((
        "example cache window for 200 and 302 responses, disabled",
        "    # proxy_cache_valid 200 302 10m;".to_string(),
    ));
    pairs.push((
        "example cache window for 404 responses, disabled",
        "    # proxy_cache_valid 404 1m;".to_string(),
    ));
    pairs.push(("end of the mirror block", "}".to_string()));

    let mut lines = Vec::with_capacity(pairs.len() * 2);
    for (annotation, directive) in pairs {
        lines.push(format!("# {annotation}"));
        lines.push(directive);
    }

    lines.join("\n")
}

/// Renders every mapping in the given order, blocks separated by a blank
/// line. An empty sequence renders to an empty string.
pub fn render_all<'a, I>(mappings: I) -> String
where
    I: IntoIterator<Item = &'a DomainMapping>,
{
    mappings
        .into_iter()
        .map(render_mapping)
        .collect::<Vec<String>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claude_mapping() -> DomainMapping {
        DomainMapping {
            source: "claude.ai".to_string(),
            proxy: "claude.hubp.de".to_string(),
        }
    }

    #[test]
    fn renders_the_proxy_pass_directive_once() {
        let config = render_mapping(&claude_mapping());

        assert_eq!(config.matches("proxy_pass https://claude.ai;").count(), 1);
    }

    #[test]
    fn renders_two_body_substitutions_for_the_source() {
        let config = render_mapping(&claude_mapping());

        assert_eq!(
            config
                .matches("    sub_filter 'claude.ai' 'claude.hubp.de';")
                .count(),
            1
        );
        assert_eq!(
            config
                .matches("    sub_filter \"//claude.ai\" \"//claude.hubp.de\";")
                .count(),
            1
        );
    }

    #[test]
    fn rewrites_redirects_with_an_escaped_source() {
        let config = render_mapping(&claude_mapping());

        assert!(config.contains(
            "    proxy_redirect ~^https://claude\\.ai(.*)$ https://claude.hubp.de$1;"
        ));
    }

    #[test]
    fn rendering_is_deterministic() {
        let mapping = claude_mapping();

        assert_eq!(render_mapping(&mapping), render_mapping(&mapping));
    }

    #[test]
    fn every_directive_line_carries_an_annotation() {
        let config = render_mapping(&claude_mapping());
        let lines: Vec<&str> = config.lines().collect();

        assert_eq!(lines.len() % 2, 0);
        for pair in lines.chunks(2) {
            assert!(pair[0].starts_with("# "), "expected annotation, got {}", pair[0]);
            assert!(!pair[1].starts_with("# "), "expected directive, got {}", pair[1]);
        }
    }

    #[test]
    fn hides_the_full_response_header_list() {
        let config = render_mapping(&claude_mapping());

        assert_eq!(
            config.matches("proxy_hide_header").count(),
            HIDDEN_RESPONSE_HEADERS.len()
        );
        assert!(config.contains("    proxy_hide_header Strict-Transport-Security;"));
        assert!(config.contains("    proxy_hide_header CF-RAY;"));
    }

    #[test]
    fn opens_and_closes_the_location_block() {
        let config = render_mapping(&claude_mapping());

        assert_eq!(config.lines().nth(1), Some("location ^~ / {"));
        assert!(config.ends_with("\n}"));
    }

    #[test]
    fn render_all_joins_blocks_with_a_blank_line() {
        let a = DomainMapping {
            source: "a.com".to_string(),
            proxy: "x.com".to_string(),
        };
        let b = DomainMapping {
            source: "b.com".to_string(),
            proxy: "y.com".to_string(),
        };

        let all = render_all([&a, &b]);

        assert_eq!(all, format!("{}\n\n{}", render_mapping(&a), render_mapping(&b)));
    }

    #[test]
    fn render_all_of_nothing_is_empty() {
        let none: Vec<DomainMapping> = Vec::new();

        assert_eq!(render_all(&none), "");
    }
}
