//! Static help screen shown by the `help` command.

pub const HELP_LINES: &[&str] = &[
    "KEYS:",
    "ARROW KEYS            MOVE THE CURSOR.",
    "PAGE UP, PAGE DOWN    JUMP SEVERAL ROWS.",
    "HOME, END             JUMP TO THE BEGINNING OR END OF A ROW.",
    "TAB                   SWITCH BETWEEN THE OFFSET, HEX AND ASCII PANELS.",
    "ESC,ESC               QUIT.",
    ":                     ENTER A COMMAND.",
    "ESC,M                 ENTER MODIFY MODE.",
    "ESC,S                 LEAVE MODIFY MODE.",
    "",
    "COMMAND SUMMARY",
    "quit                  QUIT THE PROGRAM.",
    "open <path>           OPEN A FILE READ-ONLY.",
    "openrw <path>         OPEN A FILE FOR MODIFICATION.",
    "column width <n>      SET THE ROW WIDTH TO <n> BYTES.",
    "view sync             START THE VIEW AT THE CURSOR.",
    "truncate here         TRUNCATE THE FILE AT THE CURSOR.",
    "truncate <at|to> <n>  TRUNCATE THE FILE TO <n> BYTES.",
    "go to <-|+><n>        JUMP TO OFFSET <n>, OR BY <n> WITH +/-.",
    "go to end             JUMP TO THE LAST BYTE.",
    "show <panel>          SHOW A PANEL: 'hex' OR 'asc'.",
    "hide <panel>          HIDE A PANEL.",
    "",
    "NUMBERS: 0x1F HEX, 017 OCTAL, 15 DECIMAL.",
    "",
    "HIT RETURN TO CONTINUE.",
];
