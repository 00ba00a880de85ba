//! Compiled-in output rules for every supported platform.

use crate::domain::{Dimensions, Platform, PlatformSpec, Style};
use crate::error::Result;

const VERTICAL: Dimensions = Dimensions::new(1080, 1920);
const SQUARE: Dimensions = Dimensions::new(1080, 1080);
const FULL_HD: Dimensions = Dimensions::new(1920, 1080);

static CATALOG: [PlatformSpec; 9] = [
    PlatformSpec {
        platform: Platform::Instagram,
        styles: &[
            (Style::Story, VERTICAL),
            (Style::Post, SQUARE),
            (Style::Reel, VERTICAL),
        ],
        bitrate: "4M",
        max_duration: Some(60),
    },
    PlatformSpec {
        platform: Platform::Tiktok,
        styles: &[(Style::Standard, VERTICAL)],
        bitrate: "4M",
        max_duration: Some(180),
    },
    PlatformSpec {
        platform: Platform::Twitter,
        styles: &[
            (Style::Landscape, FULL_HD),
            (Style::Square, Dimensions::new(720, 720)),
        ],
        bitrate: "2M",
        max_duration: Some(140),
    },
    PlatformSpec {
        platform: Platform::Linkedin,
        styles: &[(Style::Landscape, FULL_HD), (Style::Square, SQUARE)],
        bitrate: "5M",
        max_duration: Some(600),
    },
    PlatformSpec {
        platform: Platform::Broadcast,
        styles: &[(Style::Standard, FULL_HD), (Style::Closeup, FULL_HD)],
        bitrate: "20M",
        max_duration: None,
    },
    PlatformSpec {
        platform: Platform::Youtube,
        styles: &[(Style::Standard, FULL_HD), (Style::Shorts, VERTICAL)],
        bitrate: "10M",
        max_duration: Some(600),
    },
    PlatformSpec {
        platform: Platform::Facebook,
        styles: &[(Style::Post, SQUARE), (Style::Story, VERTICAL)],
        bitrate: "4M",
        max_duration: Some(240),
    },
    PlatformSpec {
        platform: Platform::Vimeo,
        styles: &[(Style::Standard, FULL_HD)],
        bitrate: "5M",
        max_duration: None,
    },
    PlatformSpec {
        platform: Platform::Rumble,
        styles: &[(Style::Standard, FULL_HD)],
        bitrate: "5M",
        max_duration: None,
    },
];

/// Every spec, in catalog order
pub fn all() -> &'static [PlatformSpec] {
    &CATALOG
}

pub fn lookup(platform: Platform) -> &'static PlatformSpec {
    // CATALOG has one entry per variant, in `Platform::ALL` order
    &CATALOG[platform as usize]
}

/// Look up a platform by name, failing with `UnsupportedPlatform`
pub fn lookup_name(name: &str) -> Result<&'static PlatformSpec> {
    let platform: Platform = name.parse()?;
    Ok(lookup(platform))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepurpError;

    #[test]
    fn test_catalog_order_matches_platform_order() {
        let platforms: Vec<Platform> = all().iter().map(|s| s.platform).collect();
        assert_eq!(platforms, Platform::ALL.to_vec());
        for platform in Platform::ALL {
            assert_eq!(lookup(platform).platform, platform);
        }
    }

    #[test]
    fn test_every_spec_has_styles_and_bitrate() {
        for spec in all() {
            assert!(!spec.styles.is_empty(), "{} has no styles", spec.platform);
            assert!(!spec.bitrate.is_empty(), "{} has no bitrate", spec.platform);
        }
    }

    #[test]
    fn test_styles_are_unique_per_platform() {
        for spec in all() {
            let mut styles: Vec<Style> = spec.styles().collect();
            styles.sort();
            styles.dedup();
            assert_eq!(styles.len(), spec.styles.len(), "{}", spec.platform);
        }
    }

    #[test]
    fn test_instagram_spec() {
        let spec = lookup(Platform::Instagram);
        assert_eq!(spec.dimensions(Style::Story), Some(Dimensions::new(1080, 1920)));
        assert_eq!(spec.dimensions(Style::Post), Some(Dimensions::new(1080, 1080)));
        assert_eq!(spec.dimensions(Style::Reel), Some(Dimensions::new(1080, 1920)));
        assert_eq!(spec.dimensions(Style::Landscape), None);
        assert_eq!(spec.max_duration, Some(60));
        assert_eq!(spec.bitrate, "4M");
    }

    #[test]
    fn test_tiktok_spec() {
        let spec = lookup(Platform::Tiktok);
        assert_eq!(spec.dimensions(Style::Standard), Some(Dimensions::new(1080, 1920)));
        assert_eq!(spec.dimensions(Style::Story), None);
        assert_eq!(spec.max_duration, Some(180));
        assert_eq!(spec.bitrate, "4M");
    }

    #[test]
    fn test_twitter_and_linkedin_specs() {
        let twitter = lookup(Platform::Twitter);
        assert_eq!(twitter.dimensions(Style::Landscape), Some(Dimensions::new(1920, 1080)));
        assert_eq!(twitter.dimensions(Style::Square), Some(Dimensions::new(720, 720)));
        assert_eq!(twitter.max_duration, Some(140));
        assert_eq!(twitter.bitrate, "2M");

        let linkedin = lookup(Platform::Linkedin);
        assert_eq!(linkedin.dimensions(Style::Square), Some(Dimensions::new(1080, 1080)));
        assert_eq!(linkedin.max_duration, Some(600));
        assert_eq!(linkedin.bitrate, "5M");
    }

    #[test]
    fn test_unbounded_platforms() {
        for platform in [Platform::Broadcast, Platform::Vimeo, Platform::Rumble] {
            assert_eq!(lookup(platform).max_duration, None, "{}", platform);
        }
        assert_eq!(lookup(Platform::Broadcast).bitrate, "20M");
        assert_eq!(
            lookup(Platform::Broadcast).dimensions(Style::Closeup),
            Some(Dimensions::new(1920, 1080))
        );
    }

    #[test]
    fn test_youtube_and_facebook_specs() {
        let youtube = lookup(Platform::Youtube);
        assert_eq!(youtube.dimensions(Style::Shorts), Some(Dimensions::new(1080, 1920)));
        assert_eq!(youtube.bitrate, "10M");
        assert_eq!(youtube.max_duration, Some(600));

        let facebook = lookup(Platform::Facebook);
        assert_eq!(facebook.dimensions(Style::Story), Some(Dimensions::new(1080, 1920)));
        assert_eq!(facebook.dimensions(Style::Landscape), None);
        assert_eq!(facebook.max_duration, Some(240));
    }

    #[test]
    fn test_lookup_name_rejects_unknown_platform() {
        assert_eq!(lookup_name("vimeo").unwrap().platform, Platform::Vimeo);
        let err = lookup_name("invalid_platform").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported platform: invalid_platform");
    }

    #[test]
    fn test_resolve_style_is_scoped_to_platform() {
        // "story" exists, but not on tiktok
        let err = lookup(Platform::Tiktok).resolve_style("story").unwrap_err();
        assert!(matches!(
            err,
            RepurpError::UnsupportedStyle { ref style, ref platform }
                if style == "story" && platform == "tiktok"
        ));
        let (style, dims) = lookup(Platform::Twitter).resolve_style("square").unwrap();
        assert_eq!(style, Style::Square);
        assert_eq!(dims, Dimensions::new(720, 720));
    }

    #[test]
    fn test_job_labels() {
        assert_eq!(lookup(Platform::Tiktok).job_label(Style::Standard), "tiktok");
        assert_eq!(lookup(Platform::Instagram).job_label(Style::Reel), "instagram_reel");
    }
}
