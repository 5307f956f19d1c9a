//! GPX file generation from sensor fixes.
//!
//! Generates GPX 1.1 XML that the `run-replay` binary can read back into the
//! same fixes: accuracy travels as `hdop`.

use tracker::Position;

/// Meters of accuracy per unit of HDOP; matches the tracker's default import.
pub const HDOP_SCALE_M: f64 = 5.0;

/// Generates a GPX 1.1 XML string from fixes.
///
/// The generated GPX includes:
/// - Standard GPX 1.1 header with schema declarations
/// - Single track with a single track segment
/// - Each point includes lat, lon, timestamp and hdop
pub fn generate_gpx(fixes: &[Position], activity_name: &str) -> Vec<u8> {
    let mut gpx = String::new();

    // GPX 1.1 header
    gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    gpx.push('\n');
    gpx.push_str(r#"<gpx version="1.1" creator="simple-run-test-data""#);
    gpx.push_str(r#" xmlns="http://www.topografix.com/GPX/1/1""#);
    gpx.push_str(r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#);
    gpx.push_str(r#" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">"#);
    gpx.push('\n');

    // Metadata with activity name
    gpx.push_str("  <metadata>\n");
    gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(activity_name)));
    gpx.push_str("  </metadata>\n");

    // Track
    gpx.push_str("  <trk>\n");
    gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(activity_name)));
    gpx.push_str("    <trkseg>\n");

    for fix in fixes {
        gpx.push_str(&format!(
            r#"      <trkpt lat="{:.7}" lon="{:.7}">"#,
            fix.latitude, fix.longitude
        ));
        gpx.push('\n');

        // Format as ISO 8601 / RFC 3339
        if let Ok(formatted) = fix
            .timestamp
            .format(&time::format_description::well_known::Rfc3339)
        {
            gpx.push_str(&format!("        <time>{}</time>\n", formatted));
        }

        gpx.push_str(&format!(
            "        <hdop>{:.3}</hdop>\n",
            fix.accuracy / HDOP_SCALE_M
        ));
        gpx.push_str("      </trkpt>\n");
    }

    gpx.push_str("    </trkseg>\n");
    gpx.push_str("  </trk>\n");
    gpx.push_str("</gpx>\n");

    gpx.into_bytes()
}

/// Escapes XML special characters in a string.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
