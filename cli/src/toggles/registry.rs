//! The static toggle catalog.
//!
//! Order matters: it is the interactive prompt sequence and the order in
//! which direct mode applies requested toggles.
use super::actions::{marker_only, purge_snapd, restore_snapd};
use super::{Toggle, ToggleKind};
use crate::prompt::Answer;

/// Every toggle, in application order.
pub static REGISTRY: &[Toggle] = &[
    Toggle {
        id: "mainline",
        short: Some('m'),
        name: "Mainline kernel",
        kind: ToggleKind::Feature,
        prompt: "Do you wish to install the latest Linux mainline kernel?",
        default: Answer::Yes,
        enable_help: "Enable the latest Linux mainline kernel",
        disable_help: "Disable the latest Linux mainline kernel",
        enable: marker_only,
        disable: None,
        enabled_message: "The mainline kernel has been enabled - please run \"rhino-update\" to update your system.",
        disabled_message: "The mainline kernel has been disabled. It stays installed; select the Ubuntu kernel from the grub menu to revert.",
        declined_message: "No changes were made to the Rhino configuration, the mainline kernel has not been enabled.",
    },
    Toggle {
        id: "snapdpurge",
        short: Some('s'),
        name: "Snapdpurge",
        kind: ToggleKind::Feature,
        prompt: "Do you wish to remove Snapcraft (snapd) and replace it with Flatpak?",
        default: Answer::No,
        enable_help: "Remove Snapcraft (snapd) and replace it with Flatpak",
        disable_help: "Reinstall Snapcraft (snapd)",
        enable: purge_snapd,
        disable: Some(restore_snapd),
        enabled_message: "Configuration updated, snapd has been removed from the system.",
        disabled_message: "Snapdpurge has been disabled, snapd has been reinstalled. Flatpak remains installed.",
        declined_message: "No changes were made to the Rhino configuration, snapd has not been purged.",
    },
    Toggle {
        id: "pacstall",
        short: Some('p'),
        name: "Pacstall",
        kind: ToggleKind::Feature,
        prompt: "Do you wish to enable Pacstall, an additional AUR-like package manager for Ubuntu on this system?",
        default: Answer::Yes,
        enable_help: "Enable Pacstall, an additional AUR-like package manager for Ubuntu",
        disable_help: "Disable Pacstall, an additional AUR-like package manager for Ubuntu",
        enable: marker_only,
        disable: None,
        enabled_message: "Pacstall has been enabled on the system, please check the pacstall documentation on our website for information on how to use this utility - please run \"rhino-update\" to update your system.",
        disabled_message: "Pacstall has been disabled. Applications installed with it must now be updated or removed manually.",
        declined_message: "No changes were made to the Rhino configuration, Pacstall has not been enabled.",
    },
    Toggle {
        id: "xanmod",
        short: None,
        name: "XanMod kernel",
        kind: ToggleKind::Kernel,
        prompt: "Do you wish to switch to the XanMod kernel?",
        default: Answer::No,
        enable_help: "Switch to the XanMod kernel",
        disable_help: "Stop using the XanMod kernel",
        enable: marker_only,
        disable: None,
        enabled_message: "The XanMod kernel has been enabled - please run \"rhino-update\" to install it.",
        disabled_message: "The XanMod kernel has been disabled - please run \"rhino-update\" to update your system.",
        declined_message: "No changes were made to the Rhino configuration, the XanMod kernel has not been enabled.",
    },
    Toggle {
        id: "liquorix",
        short: None,
        name: "Liquorix kernel",
        kind: ToggleKind::Kernel,
        prompt: "Do you wish to switch to the Liquorix kernel?",
        default: Answer::No,
        enable_help: "Switch to the Liquorix kernel",
        disable_help: "Stop using the Liquorix kernel",
        enable: marker_only,
        disable: None,
        enabled_message: "The Liquorix kernel has been enabled - please run \"rhino-update\" to install it.",
        disabled_message: "The Liquorix kernel has been disabled - please run \"rhino-update\" to update your system.",
        declined_message: "No changes were made to the Rhino configuration, the Liquorix kernel has not been enabled.",
    },
    Toggle {
        id: "libre",
        short: None,
        name: "Linux-libre kernel",
        kind: ToggleKind::Kernel,
        prompt: "Do you wish to switch to the Linux-libre kernel?",
        default: Answer::No,
        enable_help: "Switch to the Linux-libre kernel",
        disable_help: "Stop using the Linux-libre kernel",
        enable: marker_only,
        disable: None,
        enabled_message: "The Linux-libre kernel has been enabled - please run \"rhino-update\" to install it.",
        disabled_message: "The Linux-libre kernel has been disabled - please run \"rhino-update\" to update your system.",
        declined_message: "No changes were made to the Rhino configuration, the Linux-libre kernel has not been enabled.",
    },
];

/// Look up a toggle by identifier.
#[must_use]
pub fn find(id: &str) -> Option<&'static Toggle> {
    REGISTRY.iter().find(|t| t.id == id)
}

/// Toggles of `kind`, in registry order.
pub fn of_kind(kind: ToggleKind) -> impl Iterator<Item = &'static Toggle> {
    REGISTRY.iter().filter(move |t| t.kind == kind)
}

/// Feature toggles, in registry order.
pub fn features() -> impl Iterator<Item = &'static Toggle> {
    of_kind(ToggleKind::Feature)
}

/// Kernel toggles, in registry order.
pub fn kernels() -> impl Iterator<Item = &'static Toggle> {
    of_kind(ToggleKind::Kernel)
}

/// Identifiers of the toggles of `kind`, in registry order.
#[must_use]
pub fn ids(kind: ToggleKind) -> Vec<&'static str> {
    of_kind(kind).map(|t| t.id).collect()
}
