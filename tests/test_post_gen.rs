use std::fs;
use std::path::{Path, PathBuf};

use scaffold_hooks::commands::post_gen::{self, run_in};
use scaffold_hooks::context::{GenContext, PackageManager, Platform};
use tempfile::TempDir;

const MANAGE_PY: &str = "#!/usr/bin/env python\n\
import os\n\
import sys\n\
\n\
\n\
def main():\n\
    os.environ.setdefault(\"DJANGO_SETTINGS_MODULE\", \"config.settings\")\n\
\n\
\n\
if __name__ == \"__main__\":\n\
    main()\n";

const WSGI_PY: &str = "import os\n\
\n\
from django.core.wsgi import get_wsgi_application\n\
\n\
os.environ.setdefault(\"DJANGO_SETTINGS_MODULE\", \"config.settings\")\n\
\n\
application = get_wsgi_application()\n";

const ASGI_PY: &str = "import os\n\
\n\
from django.core.asgi import get_asgi_application\n\
\n\
os.environ.setdefault(\"DJANGO_SETTINGS_MODULE\", \"config.settings\")\n\
\n\
application = get_asgi_application()\n";

const FLAGGED: &str = "SECRET_KEY = \"!!!SET DJANGO_SECRET_KEY!!!\"\n\
CONFIG_DIR = \"!!!SET DJANGO_CONFIG_DIR!!!\"\n";

fn ctx() -> GenContext {
    GenContext {
        config_dir: "config".into(),
        use_cms: false,
        use_webpack: false,
        platform: Platform::Render,
        package_manager: PackageManager::Pip,
    }
}

/// Lays out a base project holding the generated scaffold:
/// manage.py and settings/ at the base, the config package below it,
/// and the flagged files in the generation output directory.
fn build_project(tmp: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
    let base = tmp.path().join("base");
    let config = base.join("config");
    let out = base.join("out");
    fs::create_dir_all(&config).unwrap();
    fs::create_dir_all(&out).unwrap();
    fs::create_dir_all(base.join("settings")).unwrap();

    fs::write(base.join("manage.py"), MANAGE_PY).unwrap();
    fs::write(base.join("settings/base_extra.py"), "X = 1\n").unwrap();
    fs::write(config.join("__init__.py"), "").unwrap();
    fs::write(config.join("wsgi.py"), WSGI_PY).unwrap();
    fs::write(config.join("asgi.py"), ASGI_PY).unwrap();

    for name in ["base.py", "dev.py", "production.py", "_env.dev.exemple", "_env.prod.exemple"] {
        fs::write(out.join(name), FLAGGED).unwrap();
    }

    (base, config, out)
}

fn secret_in(path: &Path) -> String {
    let content = fs::read_to_string(path).unwrap();
    let line = content.lines().find(|l| l.starts_with("SECRET_KEY")).unwrap();
    line.trim_start_matches("SECRET_KEY = \"").trim_end_matches('"').to_string()
}

#[test]
fn test_full_post_generation_flow() {
    let tmp = TempDir::new().unwrap();
    let (base, config, out) = build_project(&tmp);

    run_in(&out, &ctx()).unwrap();

    // Flags substituted in every generated file, same secret throughout.
    let secret = secret_in(&out.join("base.py"));
    assert_eq!(secret.len(), 64);
    assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    for name in ["base.py", "dev.py", "production.py", "_env.dev.exemple", "_env.prod.exemple"] {
        let content = fs::read_to_string(out.join(name)).unwrap();
        assert!(!content.contains("!!!SET"), "{name} still holds a flag");
        assert!(content.contains("CONFIG_DIR = \"config\""));
        assert_eq!(secret_in(&out.join(name)), secret);
    }

    // Bootstrap scripts import the settings package and point at dev settings.
    let manage = fs::read_to_string(base.join("manage.py")).unwrap();
    assert!(manage.contains("import sys\nfrom config import settings  # noqa: F401\n"));
    assert!(manage.contains("\"config.settings.dev\""));

    for module in ["wsgi.py", "asgi.py"] {
        let content = fs::read_to_string(config.join(module)).unwrap();
        assert!(content.contains("import os\nfrom . import settings  # noqa: F401\n"));
        assert!(content.contains("\"config.settings.dev\""));
    }

    // The generated settings directory moved into the config package.
    assert!(!base.join("settings").exists());
    assert_eq!(fs::read_to_string(config.join("settings/base_extra.py")).unwrap(), "X = 1\n");
}

#[test]
fn test_legacy_settings_file_is_backed_up() {
    let tmp = TempDir::new().unwrap();
    let (_base, config, out) = build_project(&tmp);
    fs::write(config.join("settings.py"), "LEGACY = True\n").unwrap();

    run_in(&out, &ctx()).unwrap();

    assert!(!config.join("settings.py").exists());
    assert_eq!(fs::read_to_string(config.join("settings.py.backup")).unwrap(), "LEGACY = True\n");
}

#[test]
fn test_legacy_settings_directory_is_backed_up() {
    let tmp = TempDir::new().unwrap();
    let (_base, config, out) = build_project(&tmp);
    fs::create_dir(config.join("settings")).unwrap();
    fs::write(config.join("settings/old.py"), "OLD = True\n").unwrap();

    run_in(&out, &ctx()).unwrap();

    assert_eq!(fs::read_to_string(config.join("settings.backup/old.py")).unwrap(), "OLD = True\n");
    // The freshly generated settings tree took the old name.
    assert!(config.join("settings/base_extra.py").is_file());
}

#[test]
fn test_rerunning_substitution_leaves_files_alone() {
    let tmp = TempDir::new().unwrap();
    let (_base, _config, out) = build_project(&tmp);

    run_in(&out, &ctx()).unwrap();
    let before = fs::read_to_string(out.join("base.py")).unwrap();

    // A second substitution pass finds no flags and must change nothing.
    scaffold_hooks::patch::set_flag(&out.join("base.py"), post_gen::SECRET_KEY_FLAG, "x").unwrap();
    scaffold_hooks::patch::set_flag(&out.join("base.py"), post_gen::CONFIG_DIR_FLAG, "x").unwrap();
    assert_eq!(fs::read_to_string(out.join("base.py")).unwrap(), before);
}

#[test]
fn test_failed_settings_move_keeps_the_source() {
    let tmp = TempDir::new().unwrap();
    let from = tmp.path().join("settings");
    fs::create_dir(&from).unwrap();
    fs::write(from.join("base_extra.py"), "X = 1\n").unwrap();

    // Destination path sits below a plain file, so the rename cannot succeed.
    fs::write(tmp.path().join("config"), "not a directory").unwrap();
    let to = tmp.path().join("config/settings");

    assert!(post_gen::move_dir(&from, &to).is_err());
    assert_eq!(fs::read_to_string(from.join("base_extra.py")).unwrap(), "X = 1\n");
}

#[test]
fn test_missing_config_package_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    fs::create_dir_all(&out).unwrap();
    // The stop marker keeps the search from escaping the fixture.
    fs::write(out.join("manage.py"), "").unwrap();

    assert!(run_in(&out, &ctx()).is_err());
}
