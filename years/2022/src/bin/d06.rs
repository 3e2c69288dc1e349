lib::entry!("d06.txt", y2022::d06::solve);
