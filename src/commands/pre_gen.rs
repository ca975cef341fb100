use std::env;
use std::path::Path;

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

use crate::term;

/// Runs before generation: the parent of the working directory must look
/// like the root of a Django project.
pub fn run() -> Result<()> {
    let cwd = env::current_dir().context("failed to read current directory")?;
    let Some(parent) = cwd.parent() else {
        bail!("working directory {} has no parent", cwd.display());
    };
    check_parent(parent)
}

/// `manage.py` is required as a direct child of `parent`, `wsgi.py` anywhere
/// below it. The depth asymmetry between the two checks is deliberate and
/// mirrors the upstream hook.
pub fn check_parent(parent: &Path) -> Result<()> {
    if !parent.join("manage.py").is_file() {
        term::warning("Le répertoire courant ne semble pas être la racine d'un projet Django !");
        term::warning("- Pas de fichier manage.py à la racine");
        bail!("pre-generation check failed");
    }

    let has_wsgi = WalkDir::new(parent)
        .into_iter()
        .filter_map(Result::ok)
        .any(|e| e.file_type().is_file() && e.file_name() == "wsgi.py");

    if !has_wsgi {
        term::warning("Le répertoire courant ne semble pas être la racine d'un projet Django !");
        term::warning("- Aucun module wsgi.py n'a été trouvé");
        bail!("pre-generation check failed");
    }

    Ok(())
}
