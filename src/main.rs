use clap::Parser;
use top_langs::api::Error;
use top_langs_app::Args;

/// Prints the languages of a GitHub user, most used first.
#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::init();

    let mut args = Args::parse();
    args.api_token.extend(top_langs_app::numbered_tokens("PAT_"));
    let json = args.json;

    let top_languages = top_langs_app::fetch_top_languages(args).await?;

    if json {
        let output = serde_json::to_string_pretty(&top_languages).map_err(|err| Error::Other(err.into()))?;
        println!("{}", output);
    } else {
        for language in &top_languages {
            println!("{}", language);
        }
    }

    Ok(())
}
