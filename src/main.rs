fn main() -> anyhow::Result<()> {
    palate_planner_lib::run()
}
