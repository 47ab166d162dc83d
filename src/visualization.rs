use crate::history::History;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

/// Draws best and average fitness per generation into a PNG chart.
pub fn plot_history(history: &History, output_path: &Path) -> Result<(), Box<dyn Error>> {
    if history.is_empty() {
        return Err("cannot plot an empty history".into());
    }

    // Create a drawing area for the chart.
    let root = BitMapBackend::new(output_path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let records = history.records();
    let last_gen = records.last().map(|record| record.gen).unwrap_or(0) + 1;
    let max_fitness = records
        .iter()
        .map(|record| record.best_fitness.max(record.avg_fitness))
        .fold(0.0_f64, f64::max);
    let min_fitness = records
        .iter()
        .map(|record| record.avg_fitness)
        .fold(0.0_f64, f64::min);

    let mut chart = ChartBuilder::on(&root)
        .caption("Fitness per generation", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..last_gen, min_fitness..max_fitness * 1.05 + 1.0)?;

    chart
        .configure_mesh()
        .x_desc("Generation")
        .y_desc("Fitness")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            records.iter().map(|record| (record.gen, record.best_fitness)),
            &RED,
        ))?
        .label("best")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(LineSeries::new(
            records.iter().map(|record| (record.gen, record.avg_fitness)),
            &BLUE,
        ))?
        .label("average")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    tracing::info!(path = %output_path.display(), "fitness chart saved");
    Ok(())
}
