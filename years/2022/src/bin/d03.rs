lib::entry!("d03.txt", y2022::d03::solve);
