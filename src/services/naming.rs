//! Display-name resolution for application ids
//!
//! Prefers the label registered with the OS. When that is missing, empty, or
//! the generic platform label, falls back to a curated table and then to a
//! prefix-stripping heuristic over the reverse-domain id.

use super::package_catalog::PackageLookup;

/// Label the OS reports for low-level platform components
const GENERIC_PLATFORM_LABEL: &str = "Android";

/// Curated names for well-known ids
const APP_NAME_MAPPINGS: &[(&str, &str)] = &[
    ("com.instagram.android", "Instagram"),
    ("com.twitter.android", "X (Twitter)"),
    ("com.facebook.katana", "Facebook"),
    ("com.whatsapp", "WhatsApp"),
    ("com.google.android.youtube", "YouTube"),
    ("com.google.android.apps.maps", "Google Maps"),
    ("com.google.android.gm", "Gmail"),
    ("com.google.android.apps.photos", "Google Photos"),
    ("com.google.android.apps.docs.editors.docs", "Google Docs"),
    ("com.google.android.apps.docs.editors.sheets", "Google Sheets"),
    ("com.google.android.apps.docs.editors.slides", "Google Slides"),
    ("com.google.android.apps.drive", "Google Drive"),
    ("com.google.android.calendar", "Google Calendar"),
    ("com.google.android.apps.messaging", "Messages"),
    ("com.google.android.contacts", "Contacts"),
    ("com.google.android.dialer", "Phone"),
    ("com.google.android.apps.camera", "Camera"),
    ("com.google.android.apps.gallery", "Gallery"),
    ("com.android.settings", "Settings"),
    ("com.android.systemui", "System UI"),
    ("com.android.launcher3", "Launcher"),
    ("com.android.launcher2", "Launcher"),
    ("com.android.launcher", "Launcher"),
    ("com.google.android.apps.nexuslauncher", "Pixel Launcher"),
    ("com.oneplus.launcher", "OnePlus Launcher"),
    ("com.samsung.android.launcher", "Samsung Launcher"),
    ("com.miui.home", "MIUI Launcher"),
    ("com.huawei.android.launcher", "EMUI Launcher"),
    ("com.oppo.launcher", "OPPO Launcher"),
    ("com.vivo.launcher", "vivo Launcher"),
    ("com.realme.launcher", "realme Launcher"),
];

/// Known namespace prefixes, checked in order, with the name used when
/// nothing follows the prefix
const VENDOR_PREFIXES: &[(&str, &str)] = &[
    ("com.android.", "Android System"),
    ("android.", "Android System"),
    ("com.google.android.", "Google App"),
    ("com.samsung.", "Samsung App"),
    ("com.oneplus.", "OnePlus App"),
    ("com.miui.", "MIUI App"),
    ("com.huawei.", "Huawei App"),
];

/// Resolves display names, consulting package metadata first
pub struct NameResolver<'a> {
    lookup: &'a dyn PackageLookup,
}

impl<'a> NameResolver<'a> {
    pub fn new(lookup: &'a dyn PackageLookup) -> Self {
        Self { lookup }
    }

    /// Human-readable name for `application_id`; never empty
    pub fn display_name(&self, application_id: &str) -> String {
        let label = self
            .lookup
            .package_info(application_id)
            .and_then(|info| info.label)
            .filter(|label| !label.is_empty() && label != GENERIC_PLATFORM_LABEL);

        match label {
            Some(label) => label,
            None => fallback_name(application_id),
        }
    }
}

/// Name derived without package metadata: curated table, then vendor
/// prefixes, then the last id segment.
pub fn fallback_name(application_id: &str) -> String {
    if let Some(name) = curated_name(application_id) {
        return name.to_string();
    }

    for (prefix, generic) in VENDOR_PREFIXES {
        if let Some(rest) = application_id.strip_prefix(prefix) {
            return last_segment(rest)
                .map(capitalize)
                .unwrap_or_else(|| (*generic).to_string());
        }
    }

    match last_segment(application_id) {
        Some(segment) => capitalize(segment),
        None if application_id.is_empty() => "Unknown".to_string(),
        None => application_id.to_string(),
    }
}

/// Curated display name for a well-known id
pub fn curated_name(application_id: &str) -> Option<&'static str> {
    APP_NAME_MAPPINGS
        .iter()
        .find(|(id, _)| *id == application_id)
        .map(|(_, name)| *name)
}

fn last_segment(s: &str) -> Option<&str> {
    s.split('.').rev().find(|segment| !segment.is_empty())
}

/// Uppercase the first character, leave the rest untouched
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::package_catalog::{NoPackageMetadata, PackageCatalog};
    use crate::types::PackageInfo;

    fn labelled(label: &str) -> PackageInfo {
        PackageInfo {
            label: Some(label.to_string()),
            ..Default::default()
        }
    }

    // ========== OS label ==========

    #[test]
    fn test_os_label_preferred() {
        let catalog = PackageCatalog::from_entries([("com.whatsapp", labelled("WhatsApp Beta"))]);
        let resolver = NameResolver::new(&catalog);
        assert_eq!(resolver.display_name("com.whatsapp"), "WhatsApp Beta");
    }

    #[test]
    fn test_generic_platform_label_falls_back() {
        let catalog =
            PackageCatalog::from_entries([("com.instagram.android", labelled("Android"))]);
        let resolver = NameResolver::new(&catalog);
        assert_eq!(resolver.display_name("com.instagram.android"), "Instagram");
    }

    #[test]
    fn test_empty_label_falls_back() {
        let catalog = PackageCatalog::from_entries([("com.android.foo", labelled(""))]);
        let resolver = NameResolver::new(&catalog);
        assert_eq!(resolver.display_name("com.android.foo"), "Foo");
    }

    #[test]
    fn test_missing_metadata_falls_back() {
        let resolver = NameResolver::new(&NoPackageMetadata);
        assert_eq!(resolver.display_name("com.android.foo"), "Foo");
        assert_eq!(resolver.display_name("com.twitter.android"), "X (Twitter)");
    }

    // ========== curated table ==========

    #[test]
    fn test_curated_names() {
        assert_eq!(fallback_name("com.miui.home"), "MIUI Launcher");
        assert_eq!(fallback_name("com.google.android.gm"), "Gmail");
        assert_eq!(curated_name("com.unknownvendor.coolapp"), None);
    }

    // ========== vendor prefixes ==========

    #[test]
    fn test_vendor_prefix_last_segment() {
        assert_eq!(fallback_name("android.ext.services"), "Services");
        assert_eq!(fallback_name("com.google.android.apps.tachyon"), "Tachyon");
        assert_eq!(fallback_name("com.samsung.android.messaging"), "Messaging");
        assert_eq!(fallback_name("com.huawei.health"), "Health");
    }

    #[test]
    fn test_vendor_prefix_with_empty_remainder() {
        assert_eq!(fallback_name("com.android."), "Android System");
        assert_eq!(fallback_name("com.oneplus."), "OnePlus App");
        assert_eq!(fallback_name("com.google.android.."), "Google App");
    }

    #[test]
    fn test_vendor_prefix_order_com_android_before_android() {
        // "com.android." is checked before "com.google.android."
        assert_eq!(fallback_name("com.android.providers.media"), "Media");
    }

    // ========== last segment ==========

    #[test]
    fn test_unmapped_id_uses_last_segment() {
        assert_eq!(fallback_name("com.unknownvendor.coolapp"), "Coolapp");
    }

    #[test]
    fn test_trailing_dot_skips_empty_segment() {
        assert_eq!(fallback_name("org.example.tool."), "Tool");
    }

    #[test]
    fn test_single_segment() {
        assert_eq!(fallback_name("whatsapp"), "Whatsapp");
    }

    #[test]
    fn test_only_dots_returns_raw_id() {
        assert_eq!(fallback_name("..."), "...");
    }

    #[test]
    fn test_empty_id_is_never_empty() {
        assert_eq!(fallback_name(""), "Unknown");
    }

    #[test]
    fn test_capitalize_unicode() {
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }
}
