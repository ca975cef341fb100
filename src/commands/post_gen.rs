use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::context::GenContext;
use crate::instructions;
use crate::locate::{self, SearchRequest};
use crate::patch;
use crate::secret;
use crate::term;

pub const SECRET_KEY_FLAG: &str = "!!!SET DJANGO_SECRET_KEY!!!";
pub const CONFIG_DIR_FLAG: &str = "!!!SET DJANGO_CONFIG_DIR!!!";

/// Names that identify the generated configuration package.
const PACKAGE_MARKERS: &[&str] = &["__init__.py", "wsgi.py"];
const ENTRY_SCRIPT: &str = "manage.py";
const VENV_FRAGMENTS: &[&str] = &["venv"];

/// Files the template leaves placeholder flags in, relative to the
/// generated root.
const FLAGGED_FILES: &[&str] =
    &["base.py", "dev.py", "production.py", "_env.dev.exemple", "_env.prod.exemple"];

pub fn run(ctx: &GenContext) -> Result<()> {
    let cwd = env::current_dir().context("failed to read current directory")?;
    run_in(&cwd, ctx)
}

/// The whole post-generation sequence, rooted at the generated project
/// directory. Strictly ordered, no rollback: an error leaves the earlier
/// steps applied and surfaces through the non-zero exit.
pub fn run_in(root: &Path, ctx: &GenContext) -> Result<()> {
    let config_dir = locate_required(root, PACKAGE_MARKERS, "configuration package")?;
    let base_dir = locate_required(root, &[ENTRY_SCRIPT], "project base")?;

    let config_name = dir_name(&config_dir)?;
    if config_name != ctx.config_dir {
        term::info(&format!(
            "Répertoire de configuration détecté : {config_name} (contexte : {})",
            ctx.config_dir
        ));
    }

    let secret = secret::generate()?;
    for name in FLAGGED_FILES {
        let file = root.join(name);
        patch::set_flag(&file, SECRET_KEY_FLAG, &secret)?;
        patch::set_flag(&file, CONFIG_DIR_FLAG, &config_name)?;
    }

    back_up_legacy_settings(&config_dir)?;

    patch_bootstrap(
        &base_dir.join("manage.py"),
        "import sys",
        &format!("from {config_name} import settings  # noqa: F401"),
        &config_name,
    )?;
    for module in ["wsgi.py", "asgi.py"] {
        patch_bootstrap(
            &config_dir.join(module),
            "import os",
            "from . import settings  # noqa: F401",
            &config_name,
        )?;
    }

    instructions::print(ctx);

    move_dir(&base_dir.join("settings"), &config_dir.join("settings"))?;

    term::success(&format!("Répertoire settings déplacé dans {config_name}/"));
    term::success("Vos fichiers de configuration sont prêts !");
    Ok(())
}

fn locate_required(root: &Path, targets: &[&str], what: &str) -> Result<PathBuf> {
    let request = SearchRequest {
        start: root,
        targets,
        exclude: VENV_FRAGMENTS,
        stop_markers: &[ENTRY_SCRIPT],
        max_parent_levels: None,
    };
    locate::locate(&request)?
        .with_context(|| format!("could not locate the {what} directory from {}", root.display()))
}

fn dir_name(dir: &Path) -> Result<String> {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no directory name", dir.display()))
}

/// The scaffold may land in a project that already carries a single-file
/// `settings.py` or an old `settings/` tree. Both are kept under a `.backup`
/// name, never deleted.
fn back_up_legacy_settings(config_dir: &Path) -> Result<()> {
    let legacy_file = config_dir.join("settings.py");
    if legacy_file.is_file() {
        rename(&legacy_file, &config_dir.join("settings.py.backup"))?;
        term::info("settings.py existant renommé en settings.py.backup");
    }

    let legacy_dir = config_dir.join("settings");
    if legacy_dir.is_dir() {
        rename(&legacy_dir, &config_dir.join("settings.backup"))?;
        term::info("Répertoire settings existant renommé en settings.backup");
    }

    Ok(())
}

/// Inject the settings-package import after the interpreter boilerplate and
/// point the default settings reference at the development variant.
fn patch_bootstrap(path: &Path, anchor: &str, import_line: &str, config_name: &str) -> Result<()> {
    patch::insert_after(path, anchor, import_line)?;
    patch::replace_once(
        path,
        &format!("\"{config_name}.settings\""),
        &format!("\"{config_name}.settings.dev\""),
    )
}

/// Move a directory, falling back to copy-then-remove when a plain rename
/// crosses a filesystem boundary. The source is removed only after the copy
/// fully succeeded; a failed move never discards data.
pub fn move_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        bail!("expected a settings directory at {}", from.display());
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            copy_tree(from, to)?;
            fs::remove_dir_all(from)
                .with_context(|| format!("failed to remove {} after copy", from.display()))
        }
        Err(e) => Err(e)
            .with_context(|| format!("failed to move {} to {}", from.display(), to.display())),
    }
}

fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to).with_context(|| format!("failed to create {}", to.display()))?;

    for entry in
        fs::read_dir(from).with_context(|| format!("failed to read {}", from.display()))?
    {
        let entry = entry?;
        let dest = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &dest)?;
        } else {
            fs::copy(entry.path(), &dest)
                .with_context(|| format!("failed to copy {}", entry.path().display()))?;
        }
    }

    Ok(())
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to)
        .with_context(|| format!("failed to rename {} to {}", from.display(), to.display()))
}
