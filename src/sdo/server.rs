use super::*;

impl SdoFrame {
    /// Expedited upload reply carrying `value`.
    ///
    /// `node_id` is informational, the reply is sent on the responding node's own COB-ID.
    pub fn read_reply<T: SdoValue>(
        node_id: NodeId,
        index: u16,
        sub_index: u8,
        value: T,
    ) -> Result<Self, Error> {
        Ok(SdoFrame::new(
            node_id,
            SdoCommand::Read,
            index,
            sub_index,
            SdoData::from_value(value)?,
        ))
    }

    /// Acknowledges a download of `index`/`sub_index`.
    pub fn write_ack(node_id: NodeId, index: u16, sub_index: u8) -> Self {
        SdoFrame::new(
            node_id,
            SdoCommand::WriteAck,
            index,
            sub_index,
            SdoData::EMPTY,
        )
    }

    /// Builds the reply matching this request, `None` for anything but reads and writes.
    ///
    /// A read is answered with `value`, a write with an acknowledgement.
    pub fn reply_with(&self, value: SdoData) -> Option<Self> {
        match self.command {
            SdoCommand::Read => Some(SdoFrame::new(
                self.node_id,
                SdoCommand::Read,
                self.index,
                self.sub_index,
                value,
            )),
            SdoCommand::Write => Some(SdoFrame::write_ack(
                self.node_id,
                self.index,
                self.sub_index,
            )),
            _ => None,
        }
    }
}
