//! System-app classification
//!
//! Decides whether an application id belongs to the platform or OEM shell
//! (system packages, launchers, status bar, navigation) rather than being a
//! user-installed app. The decision is an ordered cascade; the first matching
//! rule wins.
//!
//! This is a heuristic. Any third-party id containing "home" or "launcher"
//! (a smart-home controller, say) is classified as system.

use regex::Regex;
use serde::Serialize;

use super::package_catalog::PackageLookup;

/// Exact ids of known platform and OEM launcher packages
const KNOWN_SYSTEM_PACKAGES: &[&str] = &[
    "android",
    "com.android.settings",
    "com.android.systemui",
    "com.android.launcher",
    "com.android.launcher2",
    "com.android.launcher3",
    "com.google.android.apps.nexuslauncher",
    "com.oneplus.launcher",
    "com.samsung.android.launcher",
    "com.miui.home",
    "com.huawei.android.launcher",
    "com.oppo.launcher",
    "com.vivo.launcher",
    "com.realme.launcher",
];

/// Namespace prefixes owned by the platform or Google system services
const KNOWN_SYSTEM_PREFIXES: &[&str] = &[
    "android.",
    "com.android.",
    "com.google.android.apps.",
    "com.google.android.gms",
    "com.google.android.gsf",
    "com.google.android.packageinstaller",
    "com.google.android.permissioncontroller",
];

const LAUNCHER_PATTERN: &str = "(?i)launcher|home";
const SHELL_PATTERN: &str = "(?i)systemui|statusbar|navigation|quickstep";

/// Which rule of the cascade classified an id as system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemAppRule {
    /// OS reported the system or updated-system flag
    PackageFlags,
    /// Id is, or lives under, a known platform namespace
    KnownNamespace,
    /// Id looks like a home-screen replacement
    Launcher,
    /// Id looks like a shell component (status bar, navigation, recents)
    ShellComponent,
}

impl SystemAppRule {
    /// Evaluation order of the cascade
    pub const CASCADE: [SystemAppRule; 4] = [
        SystemAppRule::PackageFlags,
        SystemAppRule::KnownNamespace,
        SystemAppRule::Launcher,
        SystemAppRule::ShellComponent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SystemAppRule::PackageFlags => "package flags",
            SystemAppRule::KnownNamespace => "known system namespace",
            SystemAppRule::Launcher => "launcher",
            SystemAppRule::ShellComponent => "shell component",
        }
    }
}

/// Anything that can answer "is this id a system app?"
pub trait AppClassifier {
    fn is_system_app(&self, application_id: &str) -> bool;
}

impl<F> AppClassifier for F
where
    F: Fn(&str) -> bool,
{
    fn is_system_app(&self, application_id: &str) -> bool {
        self(application_id)
    }
}

/// Cascade classifier backed by a package metadata lookup
pub struct SystemAppClassifier<'a> {
    lookup: &'a dyn PackageLookup,
    launcher: Regex,
    shell: Regex,
}

impl<'a> SystemAppClassifier<'a> {
    pub fn new(lookup: &'a dyn PackageLookup) -> Self {
        Self {
            lookup,
            launcher: Regex::new(LAUNCHER_PATTERN).expect("valid regex"),
            shell: Regex::new(SHELL_PATTERN).expect("valid regex"),
        }
    }

    /// First rule of the cascade that marks `application_id` as system, if any
    pub fn matching_rule(&self, application_id: &str) -> Option<SystemAppRule> {
        SystemAppRule::CASCADE
            .into_iter()
            .find(|rule| self.rule_matches(*rule, application_id))
    }

    /// Evaluate a single rule in isolation
    pub fn rule_matches(&self, rule: SystemAppRule, application_id: &str) -> bool {
        match rule {
            // Missing metadata is "unknown": fall through to the heuristics
            SystemAppRule::PackageFlags => self
                .lookup
                .package_info(application_id)
                .is_some_and(|info| info.system || info.updated_system),
            SystemAppRule::KnownNamespace => is_known_system_package(application_id),
            SystemAppRule::Launcher => self.launcher.is_match(application_id),
            SystemAppRule::ShellComponent => self.shell.is_match(application_id),
        }
    }
}

impl AppClassifier for SystemAppClassifier<'_> {
    fn is_system_app(&self, application_id: &str) -> bool {
        self.matching_rule(application_id).is_some()
    }
}

/// Exact or prefix match against the static system namespace tables
pub fn is_known_system_package(application_id: &str) -> bool {
    KNOWN_SYSTEM_PACKAGES.iter().any(|id| *id == application_id)
        || KNOWN_SYSTEM_PREFIXES
            .iter()
            .any(|prefix| application_id.starts_with(prefix))
}
