mod app;
mod motion;

use std::{thread, time::Duration};

use log::error;

use app::App;

const SAMPLE_INTERVAL: Duration = Duration::from_millis(20);
const RUN_FOR: Duration = Duration::from_secs(30);

fn main() {
    env_logger::init();

    let mut app = match App::new() {
        Ok(app) => app,
        Err(err) => {
            error!("Could not start the duet: {err}");
            return;
        }
    };
    let ticks = RUN_FOR.as_millis() / SAMPLE_INTERVAL.as_millis();
    for _ in 0..ticks {
        app.update();
        thread::sleep(SAMPLE_INTERVAL);
    }
    app.report();
}
