use trade_quiz::QuizApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "ITI CBT Exam MCQ",
        options,
        Box::new(|_cc| Ok(Box::new(QuizApp::new()))),
    )
}
