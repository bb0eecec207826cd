//! Procedures behind the registry's toggles.
//!
//! Marker-only toggles have nothing to run: the updater reads their markers
//! and does the work on its next pass.
use anyhow::Result;

use super::ActionContext;

const SNAPD_CACHE: &str = "/var/cache/snapd/";
const FLATHUB_NAME: &str = "flathub";
const FLATHUB_URL: &str = "https://flathub.org/repo/flathub.flatpakrepo";

/// No system change; the marker alone carries the toggle.
///
/// # Errors
///
/// Never fails.
pub fn marker_only(ctx: &ActionContext<'_>) -> Result<()> {
    ctx.log.debug("no system change required");
    Ok(())
}

/// Remove snapd and its store plugin, hold it, and install Flatpak with Flathub.
///
/// Steps run in order and stop at the first failure.
///
/// # Errors
///
/// Returns an error naming the first step that failed.
pub fn purge_snapd(ctx: &ActionContext<'_>) -> Result<()> {
    ctx.log.info("removing the snapd cache");
    ctx.privileged(&["rm", "-rf", SNAPD_CACHE])?;

    ctx.log.info("purging snapd");
    ctx.privileged(&[
        "apt",
        "autopurge",
        "snapd",
        "gnome-software-plugin-snap",
        "-y",
    ])?;
    ctx.remove_tree(&ctx.home.join("snap"))?;
    ctx.privileged(&["apt-mark", "hold", "snapd"])?;

    ctx.log.info("installing flatpak");
    ctx.privileged(&[
        "apt",
        "install",
        "flatpak",
        "gnome-software-plugin-flatpak",
        "-y",
    ])?;
    ctx.run(
        "flatpak",
        &["remote-add", "--if-not-exists", FLATHUB_NAME, FLATHUB_URL],
    )
}

/// Reinstall snapd and its store plugin and release the hold.
///
/// Flatpak is left installed.
///
/// # Errors
///
/// Returns an error naming the first step that failed.
pub fn restore_snapd(ctx: &ActionContext<'_>) -> Result<()> {
    ctx.log.info("reinstalling snapd");
    ctx.privileged(&["apt", "install", "snapd", "gnome-software-plugin-snap", "-y"])?;
    ctx.privileged(&["apt-mark", "unhold", "snapd"])
}
