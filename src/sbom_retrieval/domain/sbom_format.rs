use serde::{Deserialize, Serialize};

/// SBOM document formats the service can produce
///
/// The wire name is what goes into the `format` query parameter; it also
/// is the canonical spelling accepted by `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SbomFormat {
    #[serde(rename = "cyclonedx1.4+json")]
    CycloneDx14Json,
    #[serde(rename = "cyclonedx1.5+json")]
    CycloneDx15Json,
    #[default]
    #[serde(rename = "cyclonedx1.6+json")]
    CycloneDx16Json,
    #[serde(rename = "spdx2.3+json")]
    Spdx23Json,
}

impl SbomFormat {
    pub const ALL: [SbomFormat; 4] = [
        SbomFormat::CycloneDx14Json,
        SbomFormat::CycloneDx15Json,
        SbomFormat::CycloneDx16Json,
        SbomFormat::Spdx23Json,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SbomFormat::CycloneDx14Json => "cyclonedx1.4+json",
            SbomFormat::CycloneDx15Json => "cyclonedx1.5+json",
            SbomFormat::CycloneDx16Json => "cyclonedx1.6+json",
            SbomFormat::Spdx23Json => "spdx2.3+json",
        }
    }

    /// MIME type of documents in this format
    pub fn media_type(&self) -> &'static str {
        match self {
            SbomFormat::CycloneDx14Json
            | SbomFormat::CycloneDx15Json
            | SbomFormat::CycloneDx16Json => "application/vnd.cyclonedx+json",
            SbomFormat::Spdx23Json => "application/spdx+json",
        }
    }

    pub fn is_spdx(&self) -> bool {
        matches!(self, SbomFormat::Spdx23Json)
    }
}

impl std::str::FromStr for SbomFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "cyclonedx" | "cdx" => return Ok(SbomFormat::CycloneDx16Json),
            "spdx" => return Ok(SbomFormat::Spdx23Json),
            _ => {}
        }

        SbomFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == normalized)
            .ok_or_else(|| {
                let supported: Vec<&str> = SbomFormat::ALL.iter().map(|f| f.as_str()).collect();
                format!(
                    "Invalid format: {}. Supported formats: {} (aliases: cyclonedx, cdx, spdx)",
                    s,
                    supported.join(", ")
                )
            })
    }
}

impl std::fmt::Display for SbomFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
