use clap::Parser;
use pesticide_dose::core::ConfigProvider;
use pesticide_dose::domain::model::LocalizedName;
use pesticide_dose::utils::error::ErrorSeverity;
use pesticide_dose::utils::{logger, validation::Validate};
use pesticide_dose::{
    AppConfig, AreaUnit, CliConfig, Command, CsvRepository, DoseCalculator, DoseError,
    DoseRequest, DoseUnit, Language, LocalStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 驗證並合併配置
    let config = match cli.validate().and_then(|_| cli.resolve()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if config.log_json {
        logger::init_json_logger(cli.verbose, config.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level.as_deref());
    }
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = run(&cli, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn load_calculator(config: &AppConfig) -> Result<DoseCalculator<CsvRepository>, DoseError> {
    let storage = LocalStorage::new(config.data_dir().to_string());
    let repository = CsvRepository::load(&storage).await?;
    Ok(DoseCalculator::new(repository))
}

async fn run(cli: &CliConfig, config: &AppConfig) -> Result<(), DoseError> {
    match &cli.command {
        Command::Units => print_units(cli.json)?,
        Command::Crops => {
            let calculator = load_calculator(config).await?;
            let crops = calculator.crops().await?;
            print_names(&crops, cli.json, config.default_language())?;
        }
        Command::Pests { crop } => {
            let calculator = load_calculator(config).await?;
            let pests = calculator.pests_for_crop(crop).await?;
            if pests.is_empty() && !cli.json {
                println!("No pests or diseases recorded for {}", crop);
            } else {
                print_names(&pests, cli.json, config.default_language())?;
            }
        }
        Command::Calculate {
            crop,
            pest,
            area,
            area_unit,
            unit,
            language,
        } => {
            let language = match language {
                Some(code) => code.parse::<Language>()?,
                None => config.default_language(),
            };
            let request = DoseRequest {
                crop_en: crop.clone(),
                pest_disease_en: pest.clone(),
                area: *area,
                area_unit: area_unit
                    .clone()
                    .unwrap_or_else(|| config.default_area_unit().to_string()),
                desired_output_unit: unit
                    .clone()
                    .unwrap_or_else(|| config.default_output_unit().to_string()),
                language,
            };

            let calculator = load_calculator(config).await?;
            let response = calculator.calculate(&request).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", response);
            }
        }
    }

    Ok(())
}

fn print_names(names: &[LocalizedName], json: bool, language: Language) -> Result<(), DoseError> {
    if json {
        println!("{}", serde_json::to_string_pretty(names)?);
        return Ok(());
    }

    for name in names {
        match language {
            Language::En => println!("{} ({})", name.name_en, name.name_hi),
            Language::Hi => println!("{} ({})", name.name_hi, name.name_en),
        }
    }
    Ok(())
}

fn print_units(json: bool) -> Result<(), DoseError> {
    let dose_units: Vec<&str> = DoseUnit::ALL.iter().map(|u| u.as_str()).collect();
    let area_units: Vec<&str> = AreaUnit::ALL.iter().map(|u| u.as_str()).collect();

    if json {
        let value = serde_json::json!({
            "dose_units": dose_units,
            "area_units": area_units,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Dose units: {}", dose_units.join(", "));
        println!("Area units: {}", area_units.join(", "));
    }
    Ok(())
}
