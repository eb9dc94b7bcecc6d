pub mod game;

pub const BEST_SCORE_FILE: &str = "best_score.json";

pub const TITLE_TEXT: &str = r#"
 ##### #      ##   #####  #####  #   #
 #     #     #  #  #    # #    #  # #
 ####  #     ####  #####  #####    #
 #     #     #  #  #      #        #
 #     ##### #  #  #      #        #
"#;

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const START_HINT: &str = "Press SPACE or click to flap";
pub const RESTART_HINT: &str = "Press ENTER to restart";
