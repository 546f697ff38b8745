fn main() { lalg_tasks::entry_points::lalg_eval() }
