use serde::{Deserialize, Serialize};

/// A launch site: code plus surface coordinates in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub code: String,
    pub longitude_deg: f64,
    pub latitude_deg: f64,
}

/// Parse the tab-separated site table.
///
/// The first column is the site code; `Longitude` and `Latitude` columns are
/// located by header name. Rows with a missing code, comment rows, and rows
/// whose coordinates do not parse are dropped.
pub fn parse_sites(text: &str) -> Vec<SiteRecord> {
    let mut lines = text.lines();
    let Some(header) = lines.next() else {
        return Vec::new();
    };

    let columns: Vec<&str> = header.split('\t').map(str::trim).collect();
    let Some(lon_idx) = columns.iter().position(|c| *c == "Longitude") else {
        tracing::warn!("site table has no Longitude column");
        return Vec::new();
    };
    let Some(lat_idx) = columns.iter().position(|c| *c == "Latitude") else {
        tracing::warn!("site table has no Latitude column");
        return Vec::new();
    };

    let mut sites = Vec::new();
    for line in lines {
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        let Some(&code) = fields.first().filter(|c| !c.is_empty()) else {
            continue;
        };
        if code.starts_with('#') {
            continue;
        }
        let coords = fields
            .get(lon_idx)
            .and_then(|v| v.parse::<f64>().ok())
            .zip(fields.get(lat_idx).and_then(|v| v.parse::<f64>().ok()));
        let Some((longitude_deg, latitude_deg)) = coords else {
            continue;
        };
        if !(-180.0..=180.0).contains(&longitude_deg) || !(-90.0..=90.0).contains(&latitude_deg) {
            tracing::warn!(code, longitude_deg, latitude_deg, "site out of range, skipping");
            continue;
        }
        sites.push(SiteRecord {
            code: code.to_string(),
            longitude_deg,
            latitude_deg,
        });
    }
    sites
}

#[cfg(test)]
mod tests {
    use super::parse_sites;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "#Site\tUcode\tType\tLongitude\tLatitude\tName";

    #[test]
    fn parses_coordinates_by_header_position() {
        let text = format!("{HEADER}\nVSFBS\tVAFB\tLS\t-120.6106\t34.7561\tVandenberg");
        let sites = parse_sites(&text);
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].code, "VSFBS");
        assert_eq!(sites[0].longitude_deg, -120.6106);
        assert_eq!(sites[0].latitude_deg, 34.7561);
    }

    #[test]
    fn comment_and_broken_rows_are_dropped() {
        let text = format!(
            "{HEADER}\n#comment\t\t\t0\t0\t\nXICH\tXSLC\tLS\tnot-a-number\t28.2\tXichang\nJQ\tJSLC\tLS\t100.3\t41.1\tJiuquan"
        );
        let sites = parse_sites(&text);
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].code, "JQ");
    }

    #[test]
    fn out_of_range_coordinates_are_dropped() {
        let text = format!("{HEADER}\nBAD\tX\tLS\t512.0\t34.0\tNowhere");
        assert!(parse_sites(&text).is_empty());
    }
}
