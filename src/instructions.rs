use crate::context::{GenContext, PackageManager, Platform};
use crate::term;

pub fn packages(ctx: &GenContext) -> Vec<&'static str> {
    let mut packages =
        vec!["argon2-cffi", "django-environ", "django-extensions", "django-debug-toolbar"];

    if ctx.use_cms {
        packages.push("wagtail");
    }
    if ctx.use_webpack {
        packages.push("django-webpack-loader");
    }
    if ctx.platform == Platform::Vps {
        packages.push("redis");
        packages.push("django-redis");
    }

    packages
}

pub fn install_command(manager: PackageManager, packages: &[&str]) -> String {
    let joined = packages.join(" ");
    match manager {
        PackageManager::Poetry => format!("poetry add {joined}"),
        PackageManager::Pdm => format!("pdm add {joined}"),
        PackageManager::Uv => format!("uv add {joined}"),
        // Plain pip syntax doubles as the fallback.
        PackageManager::Pip => format!("pip install {joined}"),
    }
}

pub fn print(ctx: &GenContext) {
    let packages = packages(ctx);

    term::hint("1. Ajouter les dépendances suivantes à votre projet :");
    for package in &packages {
        term::hint(&format!("- {package}"));
    }
    term::hint(&format!("   {}", install_command(ctx.package_manager, &packages)));
    println!();
    term::hint(
        "2. Copier _env.dev.exemple ou _env.prod.exemple à la racine de votre projet et renommez-le en .env",
    );
    println!();
    term::hint("3. Ajouter path(\"__debug__/\", include(\"debug_toolbar.urls\")) à vos urls");
    println!();
}
