use serde::{Deserialize, Serialize};

use super::{Cell, Pos};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub pos: Pos,
    pub value: Cell,
}

/// Output lines of the JSON session format.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "init")]
    Init {
        rows: usize,
        cols: usize,
        mines: usize,
        field: Vec<Vec<Cell>>,
    },
    #[serde(rename = "update")]
    Update {
        updates: Vec<CellUpdate>,
        won: bool,
        lost: bool,
    },
    #[serde(rename = "board")]
    Board { field: Vec<Vec<Cell>> },
    #[serde(rename = "error")]
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_wire_shape() {
        let msg = ServerMessage::Update {
            updates: vec![CellUpdate {
                pos: Pos::new(0, 1),
                value: Cell::Revealed { adjacent: 2 },
            }],
            won: false,
            lost: false,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            json,
            r#"{"type":"update","updates":[{"pos":{"row":0,"col":1},"value":{"state":"revealed","adjacent":2}}],"won":false,"lost":false}"#
        );
    }
}
