use playsync::{
    audio::{config::PlayerConfig, track::Track},
    ui::app::App,
    util::{hook::set_panic_hook, log::initialize_logging},
};

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> color_eyre::Result<()> {
    setup()?;

    let config = PlayerConfig::from_env();
    let tracks = std::env::args()
        .skip(1)
        .enumerate()
        .map(|(index, uri)| Track::from_uri(index, &uri))
        .collect();

    let mut app = App::new(config, tracks);
    app.run().await
}

fn setup() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    set_panic_hook();
    initialize_logging()
}
