use anyhow::Result;
use colored::Colorize;
use rentai_application::AppServices;
use rentai_core::language::Language;

pub fn show(services: &AppServices) -> Result<()> {
    let current = services.language.get();
    for language in Language::all() {
        let marker = if language == current { "*" } else { " " };
        println!("{} {}  {}", marker.green(), language.code(), language.native_name());
    }
    Ok(())
}

pub fn set(services: &AppServices, code: &str) -> Result<()> {
    let language = Language::parse(code)?;
    services.language.set_language(language)?;
    println!("Language set to {}", language.native_name().bold());
    Ok(())
}
