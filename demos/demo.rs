use lib::guarded::Guarded;

fn main() {
    let board = Guarded::new(vec!["draft".to_string()]);

    {
        let mut tasks = board.write();
        tasks.push("review".to_string());

        // Exclusive access shuts out every other guard.
        assert!(board.try_read().is_none());
        assert!(board.try_write().is_none());
    }

    let tasks = board.read();
    let again = board.try_read().expect("shared access coexists");
    println!("{:?}", &*tasks);
    println!("{} entries seen by both readers", again.len());
    drop(tasks);
    drop(again);

    println!("{:?}", board);
}
