use crate::demo::DemoState;

pub fn update(state: &mut DemoState) -> anyhow::Result<()> {
    state.stage.early_update();
    state.update()?;
    state.stage.late_update();

    Ok(())
}

pub fn run(state: &mut DemoState) -> anyhow::Result<()> {
    for _ in 0..state.config.tick_count {
        update(state)?;
    }
    state.summary();

    Ok(())
}
