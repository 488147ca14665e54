use anyhow::{Context, Result};

use remora_lib::config::Theme;

use crate::app::App;
use crate::OutputFormat;

pub fn run_show(app: &App, format: &OutputFormat) -> Result<()> {
    let data_dir = app.controller.data_dir();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "configPath": app.config_path,
                "dataDir": data_dir,
                "theme": app.config.theme,
                "study": app.config.study,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Config file:  {}", app.config_path.display());
            println!("Data dir:     {}", data_dir.display());
            println!("Theme:        {}", app.config.theme);
            println!("Shuffle:      {}", app.config.study.shuffle);
            println!("Unlearned:    {}", app.config.study.only_unlearned);
            println!("Quiz choices: {}", app.config.study.quiz_choices());
        }
    }

    Ok(())
}

pub fn run_path(app: &App) {
    println!("{}", app.config_path.display());
}

pub fn run_set_theme(app: &mut App, theme: Theme) -> Result<()> {
    app.config.theme = theme;
    app.config.save(&app.config_path)
        .with_context(|| format!("Failed to write {}", app.config_path.display()))?;
    println!("Theme set to {}", theme);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use remora_lib::Config;
    use tempfile::TempDir;

    #[test]
    fn test_set_theme_keeps_data_dir_override_out_of_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        let oneoff = temp.path().join("oneoff");

        let mut app = App::new(Some(&oneoff), Some(&config_path)).unwrap();
        assert_eq!(app.controller.data_dir(), &oneoff);

        run_set_theme(&mut app, Theme::Dark).unwrap();

        let saved = Config::load(&config_path).unwrap();
        assert_eq!(saved.theme, Theme::Dark);
        assert_eq!(saved.data_dir, None);
        assert!(!std::fs::read_to_string(&config_path).unwrap().contains("oneoff"));
    }
}
