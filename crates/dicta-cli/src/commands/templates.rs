//! List and inspect note templates.

use anyhow::Result;

use dicta_core::{list_templates, load_template};

use crate::args::TemplatesCommand;
use crate::ui;

pub fn run(command: Option<TemplatesCommand>) -> Result<()> {
    match command.unwrap_or(TemplatesCommand::List) {
        TemplatesCommand::List => list(),
        TemplatesCommand::Show { name } => show(&name),
    }
}

fn list() -> Result<()> {
    let settings = dicta_core::Settings::load();
    let default = settings.note.template.as_deref();

    for template in list_templates()? {
        let first_line = template.body.lines().next().unwrap_or("").trim();
        let marker = if Some(template.name.as_str()) == default {
            " (default)"
        } else {
            ""
        };
        println!(
            "{:<12}{}  {}",
            template.name,
            marker,
            ui::dim(first_line)
        );
    }

    if let Some(dir) = dicta_core::note::template::templates_dir() {
        println!();
        ui::info(&format!(
            "Add your own templates as .md files in {}",
            dir.display()
        ));
    }

    Ok(())
}

fn show(name: &str) -> Result<()> {
    let template = load_template(name)?;
    print!("{}", template.body);
    Ok(())
}
